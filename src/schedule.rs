//! Periodic sync driver.
//!
//! One tokio task ticks at a fixed interval and calls [`SyncOrchestrator::sync_once`]. The first
//! tick fires immediately. Ticks that come due while an attempt is still running are skipped,
//! and manual triggers racing the timer are dropped by the orchestrator's single-flight guard.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::sync::{SyncOrchestrator, SyncOutcome};

/// Handle to the running timer. Dropping it without calling [`PeriodicSync::shutdown`] also
/// stops the timer, without waiting.
pub struct PeriodicSync {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<u64>,
}

impl PeriodicSync {
    pub fn spawn(orchestrator: Arc<SyncOrchestrator>, every: Duration) -> Self {
        let (shutdown, mut stop) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut attempts = 0u64;
            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = ticker.tick() => {
                        attempts += 1;
                        match orchestrator.sync_once().await {
                            SyncOutcome::Failed { phase, error } => {
                                warn!(%phase, error = %error, "periodic sync failed; retrying next tick");
                            }
                            SyncOutcome::Skipped => debug!("periodic tick skipped"),
                            SyncOutcome::Completed(_) => {}
                        }
                    }
                }
            }
            info!(attempts, "periodic sync stopped");
            attempts
        });
        Self { shutdown, handle }
    }

    /// Stops the timer and waits for the task to exit. An attempt already running is allowed to
    /// finish. Returns the number of ticks that triggered a sync.
    pub async fn shutdown(self) -> u64 {
        let PeriodicSync { shutdown, handle } = self;
        let _ = shutdown.send(());
        match handle.await {
            Ok(attempts) => attempts,
            Err(err) => {
                warn!(error = %err, "periodic sync task ended abnormally");
                0
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
#[path = "tests/schedule_tests.rs"]
mod tests;
