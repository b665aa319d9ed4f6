//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    error::WidgetError,
    state::AppState,
    widgets::{
        input::{parse_decimal, parse_whole},
        CountdownView, GuessOutcome, GuessingView, JokeView, TipView,
    },
};
use super::responses::{HealthResponse, InputRequest, StatusResponse, WidgetResponse};

type WidgetResult<T> = Result<Json<WidgetResponse<T>>, StatusCode>;

/// Turn a widget action result into a response.
///
/// Rejected actions come back as `ignored` with the unchanged widget; only
/// internal failures become HTTP errors.
fn respond<T>(
    result: Result<T, WidgetError>,
    message: impl FnOnce(&T) -> String,
    current: impl FnOnce() -> Result<T, WidgetError>,
) -> WidgetResult<T> {
    match result {
        Ok(view) => {
            let message = message(&view);
            Ok(Json(WidgetResponse::ok(message, view)))
        }
        Err(e) if e.is_internal() => {
            error!("Widget action failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => match current() {
            Ok(view) => Ok(Json(WidgetResponse::ignored(e.to_string(), view))),
            Err(e) => {
                error!("Failed to read widget state: {}", e);
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },
    }
}

/// Plain read of a widget view
fn show<T>(result: Result<T, WidgetError>) -> WidgetResult<T> {
    result
        .map(|view| Json(WidgetResponse::ok("Current state", view)))
        .map_err(|e| {
            error!("Failed to read widget state: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

// ----------------------------------------------------------------------
// Countdown
// ----------------------------------------------------------------------

/// Handle GET /countdown
pub async fn countdown_handler(State(state): State<Arc<AppState>>) -> WidgetResult<CountdownView> {
    show(state.countdown.view())
}

/// Handle POST /countdown/duration - set a new duration
pub async fn countdown_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InputRequest>,
) -> WidgetResult<CountdownView> {
    let result = parse_whole(&request.input)
        .ok_or_else(|| {
            WidgetError::invalid_input("duration", "must be a positive number of seconds")
        })
        .and_then(|seconds| state.update_countdown("countdown-set", |timer| timer.set(seconds)));

    respond(
        result,
        |view| format!("Duration set to {}", view.display),
        || state.countdown.view(),
    )
}

/// Handle POST /countdown/start - start or resume
pub async fn countdown_start_handler(State(state): State<Arc<AppState>>) -> WidgetResult<CountdownView> {
    respond(
        state.update_countdown("countdown-start", |timer| timer.start()),
        |view| format!("Countdown running from {}", view.display),
        || state.countdown.view(),
    )
}

/// Handle POST /countdown/pause
pub async fn countdown_pause_handler(State(state): State<Arc<AppState>>) -> WidgetResult<CountdownView> {
    respond(
        state.update_countdown("countdown-pause", |timer| timer.pause()),
        |view| format!("Countdown paused at {}", view.display),
        || state.countdown.view(),
    )
}

/// Handle POST /countdown/reset
pub async fn countdown_reset_handler(State(state): State<Arc<AppState>>) -> WidgetResult<CountdownView> {
    respond(
        state.update_countdown("countdown-reset", |timer| timer.reset()),
        |view| format!("Countdown reset to {}", view.display),
        || state.countdown.view(),
    )
}

// ----------------------------------------------------------------------
// Guessing game
// ----------------------------------------------------------------------

/// Handle GET /guessing
pub async fn guessing_handler(State(state): State<Arc<AppState>>) -> WidgetResult<GuessingView> {
    show(state.guessing_view())
}

/// Handle POST /guessing/start
pub async fn guessing_start_handler(State(state): State<Arc<AppState>>) -> WidgetResult<GuessingView> {
    respond(
        state.start_guessing(),
        |_| "Try to guess the number between 1 and 10!".to_string(),
        || state.guessing_view(),
    )
}

/// Handle POST /guessing/guess - non-numeric input is rejected without counting
pub async fn guessing_guess_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InputRequest>,
) -> WidgetResult<GuessingView> {
    let result = parse_whole(&request.input)
        .ok_or_else(|| WidgetError::invalid_input("guess", "must be a whole number"))
        .and_then(|value| state.guess(value));

    let (outcome, result) = match result {
        Ok((outcome, view)) => (Some(outcome), Ok(view)),
        Err(e) => (None, Err(e)),
    };

    respond(
        result,
        |view| match outcome {
            Some(GuessOutcome::Correct) => "Game Over! You got it.".to_string(),
            _ => format!("Wrong guess. Attempts: {}", view.attempts),
        },
        || state.guessing_view(),
    )
}

/// Handle POST /guessing/pause
pub async fn guessing_pause_handler(State(state): State<Arc<AppState>>) -> WidgetResult<GuessingView> {
    respond(
        state.pause_guessing(),
        |_| "Game paused".to_string(),
        || state.guessing_view(),
    )
}

/// Handle POST /guessing/resume
pub async fn guessing_resume_handler(State(state): State<Arc<AppState>>) -> WidgetResult<GuessingView> {
    respond(
        state.resume_guessing(),
        |_| "Game resumed".to_string(),
        || state.guessing_view(),
    )
}

/// Handle POST /guessing/try-again
pub async fn guessing_try_again_handler(State(state): State<Arc<AppState>>) -> WidgetResult<GuessingView> {
    respond(
        state.try_again_guessing(),
        |_| "Press start to play again".to_string(),
        || state.guessing_view(),
    )
}

// ----------------------------------------------------------------------
// Joke
// ----------------------------------------------------------------------

/// Handle GET /joke
pub async fn joke_handler(State(state): State<Arc<AppState>>) -> WidgetResult<JokeView> {
    show(state.joke_view())
}

/// Handle POST /joke/refresh - fetch a new joke; failures show the failure text
pub async fn joke_refresh_handler(State(state): State<Arc<AppState>>) -> WidgetResult<JokeView> {
    let result = state.refresh_joke().await;
    respond(result, |_| "Joke refreshed".to_string(), || state.joke_view())
}

// ----------------------------------------------------------------------
// Tip calculator
// ----------------------------------------------------------------------

/// Handle GET /tip
pub async fn tip_handler(State(state): State<Arc<AppState>>) -> WidgetResult<TipView> {
    show(state.tip_view())
}

/// Handle POST /tip/bill - invalid input clears the bill amount
pub async fn tip_bill_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InputRequest>,
) -> WidgetResult<TipView> {
    let bill = parse_decimal(&request.input);
    respond(
        state.set_bill(bill),
        |_| match bill {
            Some(amount) => format!("Bill amount set to {}", amount),
            None => "Bill amount cleared".to_string(),
        },
        || state.tip_view(),
    )
}

/// Handle POST /tip/percentage - invalid input clears the percentage
pub async fn tip_percentage_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InputRequest>,
) -> WidgetResult<TipView> {
    let percentage = parse_decimal(&request.input);
    respond(
        state.set_tip_percentage(percentage),
        |_| match percentage {
            Some(pct) => format!("Tip percentage set to {}", pct),
            None => "Tip percentage cleared".to_string(),
        },
        || state.tip_view(),
    )
}

/// Handle POST /tip/calculate
pub async fn tip_calculate_handler(State(state): State<Arc<AppState>>) -> WidgetResult<TipView> {
    respond(
        state.calculate_tip(),
        |view| format!("Tip {} / Total {}", view.tip_display, view.total_display),
        || state.tip_view(),
    )
}

// ----------------------------------------------------------------------
// Server
// ----------------------------------------------------------------------

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let countdown_ticking = match state.countdown.is_ticking() {
        Ok(ticking) => ticking,
        Err(e) => {
            error!("Failed to get countdown state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();
    info!("Status requested");

    Ok(Json(StatusResponse {
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        countdown_ticking,
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
