//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope returned by every widget endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetResponse<T> {
    /// `ok` when the action applied, `ignored` when it was rejected
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub widget: T,
}

impl<T> WidgetResponse<T> {
    /// Create a new widget response
    pub fn new(status: String, message: String, widget: T) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            widget,
        }
    }

    /// The action applied
    pub fn ok(message: impl Into<String>, widget: T) -> Self {
        Self::new("ok".to_string(), message.into(), widget)
    }

    /// The action was rejected and the widget left as it was
    pub fn ignored(message: impl Into<String>, widget: T) -> Self {
        Self::new("ignored".to_string(), message.into(), widget)
    }
}

/// Raw text from a numeric input field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputRequest {
    #[serde(default)]
    pub input: String,
}

/// Server status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub countdown_ticking: bool,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
