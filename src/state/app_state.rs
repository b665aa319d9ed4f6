//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    error::WidgetError,
    widgets::{
        GuessOutcome, GuessingSession, GuessingView, JokeBoard, JokeSource, JokeView,
        TipCalculator, TipView,
    },
};

use super::CountdownTimer;

/// Main application state holding one session per widget
pub struct AppState {
    /// Countdown session and its tick source
    pub countdown: CountdownTimer,
    pub guessing: Mutex<GuessingSession>,
    pub joke: Mutex<JokeBoard>,
    pub joke_source: Arc<dyn JokeSource>,
    pub tip: Mutex<TipCalculator>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        tick_period: Duration,
        joke_source: Arc<dyn JokeSource>,
    ) -> Self {
        Self {
            countdown: CountdownTimer::new(tick_period),
            guessing: Mutex::new(GuessingSession::new()),
            joke: Mutex::new(JokeBoard::new()),
            joke_source,
            tip: Mutex::new(TipCalculator::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Remember the most recent action for `/status`
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    // ------------------------------------------------------------------
    // Guessing game
    // ------------------------------------------------------------------

    /// Lock the guessing session, apply `updater` and record the action
    pub fn update_guessing<F, T>(&self, action: &str, updater: F) -> Result<T, WidgetError>
    where
        F: FnOnce(&mut GuessingSession) -> Result<T, WidgetError>,
    {
        let mut session = self
            .guessing
            .lock()
            .map_err(|_| WidgetError::StateLock("guessing game"))?;
        let result = updater(&mut *session);
        drop(session);

        match &result {
            Ok(_) => self.record_action(action),
            Err(e) => warn!("Guessing game {} ignored: {}", action, e),
        }
        result
    }

    pub fn guessing_view(&self) -> Result<GuessingView, WidgetError> {
        self.guessing
            .lock()
            .map(|session| session.view())
            .map_err(|_| WidgetError::StateLock("guessing game"))
    }

    pub fn start_guessing(&self) -> Result<GuessingView, WidgetError> {
        self.update_guessing("guessing-start", |session| {
            session.start();
            info!("Guessing game started");
            Ok(session.view())
        })
    }

    pub fn guess(&self, value: u64) -> Result<(GuessOutcome, GuessingView), WidgetError> {
        self.update_guessing("guessing-guess", |session| {
            let outcome = session.guess(value)?;
            info!("Guess {} was {:?} after {} attempts", value, outcome, session.attempts());
            Ok((outcome, session.view()))
        })
    }

    pub fn pause_guessing(&self) -> Result<GuessingView, WidgetError> {
        self.update_guessing("guessing-pause", |session| {
            session.pause()?;
            Ok(session.view())
        })
    }

    pub fn resume_guessing(&self) -> Result<GuessingView, WidgetError> {
        self.update_guessing("guessing-resume", |session| {
            session.resume()?;
            Ok(session.view())
        })
    }

    pub fn try_again_guessing(&self) -> Result<GuessingView, WidgetError> {
        self.update_guessing("guessing-try-again", |session| {
            session.try_again();
            Ok(session.view())
        })
    }

    // ------------------------------------------------------------------
    // Joke
    // ------------------------------------------------------------------

    pub fn joke_view(&self) -> Result<JokeView, WidgetError> {
        self.joke
            .lock()
            .map(|board| board.view())
            .map_err(|_| WidgetError::StateLock("joke"))
    }

    /// Fetch one joke and show it, or show the failure text.
    ///
    /// The board is only locked after the request completes.
    pub async fn refresh_joke(&self) -> Result<JokeView, WidgetError> {
        let outcome = self.joke_source.fetch_joke().await;

        let mut board = self.joke.lock().map_err(|_| WidgetError::StateLock("joke"))?;
        board.apply(outcome);
        let view = board.view();
        drop(board);

        self.record_action("joke-refresh");
        Ok(view)
    }

    // ------------------------------------------------------------------
    // Tip calculator
    // ------------------------------------------------------------------

    fn update_tip<F, T>(&self, action: &str, updater: F) -> Result<T, WidgetError>
    where
        F: FnOnce(&mut TipCalculator) -> Result<T, WidgetError>,
    {
        let mut calc = self.tip.lock().map_err(|_| WidgetError::StateLock("tip"))?;
        let result = updater(&mut *calc);
        drop(calc);

        match &result {
            Ok(_) => self.record_action(action),
            Err(e) => warn!("Tip calculator {} ignored: {}", action, e),
        }
        result
    }

    pub fn tip_view(&self) -> Result<TipView, WidgetError> {
        self.tip
            .lock()
            .map(|calc| calc.view())
            .map_err(|_| WidgetError::StateLock("tip"))
    }

    pub fn set_bill(&self, bill: Option<f64>) -> Result<TipView, WidgetError> {
        self.update_tip("tip-bill", |calc| {
            calc.set_bill(bill);
            Ok(calc.view())
        })
    }

    pub fn set_tip_percentage(&self, percentage: Option<f64>) -> Result<TipView, WidgetError> {
        self.update_tip("tip-percentage", |calc| {
            calc.set_percentage(percentage);
            Ok(calc.view())
        })
    }

    pub fn calculate_tip(&self) -> Result<TipView, WidgetError> {
        self.update_tip("tip-calculate", |calc| {
            let breakdown = calc.calculate()?;
            info!(
                "Tip calculated: tip={:.2} total={:.2}",
                breakdown.tip_amount, breakdown.total_amount
            );
            Ok(calc.view())
        })
    }

    // ------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------

    /// Run a countdown transition and record it when it applies
    pub fn update_countdown<F, T>(&self, action: &str, transition: F) -> Result<T, WidgetError>
    where
        F: FnOnce(&CountdownTimer) -> Result<T, WidgetError>,
    {
        let result = transition(&self.countdown);
        match &result {
            Ok(_) => self.record_action(action),
            Err(e) => warn!("Countdown {} ignored: {}", action, e),
        }
        result
    }

    /// Stop background work before the process exits
    pub fn shutdown(&self) {
        if let Err(e) = self.countdown.shutdown() {
            warn!("Failed to stop countdown ticker: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{GuessingPhase, Joke, JokeError, FETCH_FAILED_MESSAGE};
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl JokeSource for FailingSource {
        async fn fetch_joke(&self) -> Result<Joke, JokeError> {
            Err(JokeError::Unavailable("offline".to_string()))
        }
    }

    fn state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), Duration::from_secs(1), Arc::new(FailingSource))
    }

    #[test]
    fn records_only_applied_actions() {
        let state = state();
        assert!(state.pause_guessing().is_err());
        assert_eq!(state.get_last_action().0, None);

        state.start_guessing().unwrap();
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("guessing-start"));
        assert!(time.is_some());
    }

    #[test]
    fn guessing_round_trip_through_state() {
        let state = state();
        state.start_guessing().unwrap();
        let target = state.guessing.lock().unwrap().target().unwrap();

        let (outcome, view) = state.guess(target).unwrap();
        assert_eq!(outcome, GuessOutcome::Correct);
        assert_eq!(view.phase, GuessingPhase::Won);

        let view = state.try_again_guessing().unwrap();
        assert_eq!(view.phase, GuessingPhase::NotStarted);
    }

    #[test]
    fn uptime_starts_in_seconds() {
        assert!(state().get_uptime().ends_with('s'));
    }

    #[tokio::test]
    async fn failed_refresh_shows_failure_text() {
        let state = state();
        let view = state.refresh_joke().await.unwrap();
        assert!(view.loaded);
        assert_eq!(view.text, FETCH_FAILED_MESSAGE);
    }

    #[test]
    fn tip_inputs_then_calculate() {
        let state = state();
        assert!(state.calculate_tip().is_err());
        state.set_bill(Some(200.0)).unwrap();
        state.set_tip_percentage(Some(15.0)).unwrap();
        let view = state.calculate_tip().unwrap();
        assert_eq!(view.tip_display, "$30.00");
        assert_eq!(view.total_display, "$230.00");
    }
}
