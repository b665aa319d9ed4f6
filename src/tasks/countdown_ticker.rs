//! Recurring countdown tick task

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{state::timer_state::CountdownShared, widgets::TickOutcome};

/// Handle to the one scheduled tick source.
///
/// Dropping the handle closes the cancel channel, which also stops the task.
#[derive(Debug)]
pub struct TickerHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl TickerHandle {
    /// Stop the task; no tick is applied after this returns
    pub fn cancel(mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        self.join.abort();
    }

    /// The task ended on its own (expired or found the session stopped)
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Spawn the task that ticks `shared` once per `period` while it is running
pub fn spawn_countdown_ticker(shared: Arc<CountdownShared>, period: Duration) -> TickerHandle {
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let join = tokio::spawn(countdown_ticker_task(shared, period, cancel_rx));
    TickerHandle {
        cancel_tx: Some(cancel_tx),
        join,
    }
}

async fn countdown_ticker_task(
    shared: Arc<CountdownShared>,
    period: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    debug!("Starting countdown ticker with period {:?}", period);

    // First tick lands one full period after start
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match shared.apply_tick() {
                    Ok(TickOutcome::Continue) => {}
                    Ok(TickOutcome::Expired) => {
                        info!("Countdown expired");
                        break;
                    }
                    Ok(TickOutcome::Idle) => {
                        debug!("Countdown no longer running, stopping ticker");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to apply countdown tick: {}", e);
                        break;
                    }
                }
            }

            _ = &mut cancel_rx => {
                debug!("Countdown ticker cancelled");
                break;
            }
        }
    }
}
