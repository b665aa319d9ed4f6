//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/countdown", get(countdown_handler))
        .route("/countdown/duration", post(countdown_duration_handler))
        .route("/countdown/start", post(countdown_start_handler))
        .route("/countdown/pause", post(countdown_pause_handler))
        .route("/countdown/reset", post(countdown_reset_handler))
        .route("/guessing", get(guessing_handler))
        .route("/guessing/start", post(guessing_start_handler))
        .route("/guessing/guess", post(guessing_guess_handler))
        .route("/guessing/pause", post(guessing_pause_handler))
        .route("/guessing/resume", post(guessing_resume_handler))
        .route("/guessing/try-again", post(guessing_try_again_handler))
        .route("/joke", get(joke_handler))
        .route("/joke/refresh", post(joke_refresh_handler))
        .route("/tip", get(tip_handler))
        .route("/tip/bill", post(tip_bill_handler))
        .route("/tip/percentage", post(tip_percentage_handler))
        .route("/tip/calculate", post(tip_calculate_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
