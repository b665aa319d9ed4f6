//! Countdown timer state and tick scheduling

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::WidgetError,
    tasks::{spawn_countdown_ticker, TickerHandle},
    widgets::{CountdownSession, CountdownView, TickOutcome},
};

/// Session plus the channel its views are published on.
///
/// Shared between the timer and its tick task.
#[derive(Debug)]
pub struct CountdownShared {
    session: Mutex<CountdownSession>,
    updates_tx: watch::Sender<CountdownView>,
}

impl CountdownShared {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, CountdownSession>, WidgetError> {
        self.session
            .lock()
            .map_err(|_| WidgetError::StateLock("countdown"))
    }

    fn publish(&self, view: &CountdownView) {
        if let Err(e) = self.updates_tx.send(view.clone()) {
            warn!("Failed to send countdown update: {}", e);
        }
    }

    /// Apply one tick and publish the result
    pub fn apply_tick(&self) -> Result<TickOutcome, WidgetError> {
        let mut session = self.lock()?;
        let outcome = session.tick();
        let view = session.view();
        drop(session);

        if outcome != TickOutcome::Idle {
            debug!("Countdown tick: {} remaining", view.display);
            self.publish(&view);
        }
        Ok(outcome)
    }
}

/// Countdown widget with at most one scheduled tick source.
///
/// Every transition holds the ticker slot for its whole duration, so a
/// transition and the spawn/cancel it implies are never interleaved with
/// another transition.
#[derive(Debug)]
pub struct CountdownTimer {
    shared: Arc<CountdownShared>,
    ticker: Mutex<Option<TickerHandle>>,
    tick_period: Duration,
    /// Keep the receiver alive to prevent channel closure
    _updates_rx: watch::Receiver<CountdownView>,
}

impl CountdownTimer {
    pub fn new(tick_period: Duration) -> Self {
        let session = CountdownSession::new();
        let (updates_tx, updates_rx) = watch::channel(session.view());

        Self {
            shared: Arc::new(CountdownShared {
                session: Mutex::new(session),
                updates_tx,
            }),
            ticker: Mutex::new(None),
            tick_period,
            _updates_rx: updates_rx,
        }
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Receive a view after every transition and tick
    pub fn subscribe(&self) -> watch::Receiver<CountdownView> {
        self.shared.updates_tx.subscribe()
    }

    pub fn view(&self) -> Result<CountdownView, WidgetError> {
        Ok(self.shared.lock()?.view())
    }

    /// Whether a tick task is currently scheduled and alive
    pub fn is_ticking(&self) -> Result<bool, WidgetError> {
        let ticker = self.lock_ticker()?;
        Ok(ticker.as_ref().is_some_and(|handle| !handle.is_finished()))
    }

    pub fn set(&self, duration_seconds: u64) -> Result<CountdownView, WidgetError> {
        self.transition("set", |session| session.set(duration_seconds), false)
    }

    pub fn start(&self) -> Result<CountdownView, WidgetError> {
        self.transition("start", CountdownSession::start, true)
    }

    pub fn pause(&self) -> Result<CountdownView, WidgetError> {
        self.transition("pause", CountdownSession::pause, false)
    }

    pub fn reset(&self) -> Result<CountdownView, WidgetError> {
        self.transition(
            "reset",
            |session| {
                session.reset();
                Ok(())
            },
            false,
        )
    }

    /// Cancel any scheduled tick; used on teardown
    pub fn shutdown(&self) -> Result<(), WidgetError> {
        let mut ticker = self.lock_ticker()?;
        if let Some(handle) = ticker.take() {
            info!("Cancelling countdown ticker on shutdown");
            handle.cancel();
        }
        Ok(())
    }

    fn lock_ticker(&self) -> Result<std::sync::MutexGuard<'_, Option<TickerHandle>>, WidgetError> {
        self.ticker
            .lock()
            .map_err(|_| WidgetError::StateLock("countdown ticker"))
    }

    /// Apply `apply` to the session, then cancel the old tick source and,
    /// when `schedule` is set, spawn a new one.
    fn transition<F>(&self, action: &str, apply: F, schedule: bool) -> Result<CountdownView, WidgetError>
    where
        F: FnOnce(&mut CountdownSession) -> Result<(), WidgetError>,
    {
        let mut ticker = self.lock_ticker()?;

        let mut session = self.shared.lock()?;
        apply(&mut *session)?;
        let view = session.view();
        drop(session);

        if let Some(handle) = ticker.take() {
            handle.cancel();
        }
        if schedule {
            *ticker = Some(spawn_countdown_ticker(
                Arc::clone(&self.shared),
                self.tick_period,
            ));
        }
        drop(ticker);

        info!("Countdown {}: {} ({})", action, view.phase, view.display);
        self.shared.publish(&view);
        Ok(view)
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if let Ok(mut ticker) = self.ticker.lock() {
            if let Some(handle) = ticker.take() {
                handle.cancel();
            }
        }
    }
}
