//! Error types shared by the widget sessions

use thiserror::Error;

/// Why a widget action was not applied.
///
/// Everything except `StateLock` is a user-level rejection: the handlers
/// report it as `ignored` and leave the widget as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Input was absent, non-numeric or out of range
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    /// The action is not allowed from the widget's current phase
    #[error("Cannot {action} the {widget} while it is {phase}")]
    InvalidTransition {
        widget: &'static str,
        action: &'static str,
        phase: String,
    },

    /// A computation was triggered before all inputs were set
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    /// A widget mutex was poisoned
    #[error("Failed to lock {0} state")]
    StateLock(&'static str),
}

impl WidgetError {
    pub fn invalid_input(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidInput { field, reason }
    }

    pub fn invalid_transition(
        widget: &'static str,
        action: &'static str,
        phase: impl ToString,
    ) -> Self {
        Self::InvalidTransition {
            widget,
            action,
            phase: phase.to_string(),
        }
    }

    /// Internal failures are the only ones surfaced as HTTP errors
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::StateLock(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_widget_and_phase() {
        let err = WidgetError::invalid_transition("countdown", "pause", "ready");
        assert_eq!(err.to_string(), "Cannot pause the countdown while it is ready");
        assert!(!err.is_internal());
        assert!(WidgetError::StateLock("tip").is_internal());
    }
}
