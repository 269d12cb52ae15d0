//! Sync orchestrator: fetch → merge → push → commit, one attempt at a time.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::error::QuoteError;
use crate::merge::merge_entries;
use crate::model::Conflict;
use crate::remote::RemoteGateway;
use crate::store::EntryStore;

pub type SharedStore = Arc<Mutex<EntryStore>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    Fetching,
    Merging,
    Pushing,
    Committed,
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncPhase::Idle => "idle",
            SyncPhase::Fetching => "fetching",
            SyncPhase::Merging => "merging",
            SyncPhase::Pushing => "pushing",
            SyncPhase::Committed => "committed",
            SyncPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncReport {
    /// Local list was replaced by the merge result.
    pub replaced: bool,
    pub conflicts: Vec<Conflict>,
    pub pushed: bool,
    pub entries: usize,
    pub synced_at: OffsetDateTime,
}

#[derive(Debug)]
pub enum SyncOutcome {
    /// Another attempt was already in flight; this trigger was dropped.
    Skipped,
    Completed(SyncReport),
    Failed { phase: SyncPhase, error: QuoteError },
}

impl SyncOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SyncOutcome::Completed(_))
    }

    /// One-line status for display.
    pub fn status_line(&self) -> String {
        match self {
            SyncOutcome::Skipped => "sync already in progress".to_string(),
            SyncOutcome::Completed(report) => {
                let at = report
                    .synced_at
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| report.synced_at.to_string());
                let mut line = format!("synced {} quote(s) at {}", report.entries, at);
                if !report.conflicts.is_empty() {
                    line.push_str(&format!(
                        "; {} conflict(s) resolved in favor of the server",
                        report.conflicts.len()
                    ));
                }
                if report.pushed {
                    line.push_str("; local changes pushed");
                }
                line
            }
            SyncOutcome::Failed { phase, error } => {
                format!("sync failed while {}: {}", phase, error)
            }
        }
    }
}

type StepResult<T> = Result<T, (SyncPhase, QuoteError)>;

pub struct SyncOrchestrator {
    store: SharedStore,
    remote: Arc<dyn RemoteGateway>,
    in_flight: AtomicBool,
    phase: watch::Sender<SyncPhase>,
}

impl SyncOrchestrator {
    pub fn new(store: SharedStore, remote: Arc<dyn RemoteGateway>) -> Self {
        let (phase, _) = watch::channel(SyncPhase::Idle);
        Self {
            store,
            remote,
            in_flight: AtomicBool::new(false),
            phase,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn phase(&self) -> SyncPhase {
        *self.phase.borrow()
    }

    /// Observe phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<SyncPhase> {
        self.phase.subscribe()
    }

    /// Runs one sync attempt unless one is already running. Never returns an error: failures
    /// are reported through [`SyncOutcome::Failed`].
    pub async fn sync_once(&self) -> SyncOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("sync trigger dropped; attempt already in flight");
            return SyncOutcome::Skipped;
        }
        let _flight = FlightGuard(&self.in_flight);

        let outcome = match self.attempt().await {
            Ok(report) => {
                info!(
                    entries = report.entries,
                    conflicts = report.conflicts.len(),
                    replaced = report.replaced,
                    pushed = report.pushed,
                    "sync completed"
                );
                SyncOutcome::Completed(report)
            }
            Err((phase, error)) => {
                self.phase.send_replace(SyncPhase::Failed);
                warn!(%phase, error = %error, "sync failed");
                SyncOutcome::Failed { phase, error }
            }
        };
        self.phase.send_replace(SyncPhase::Idle);
        outcome
    }

    async fn attempt(&self) -> StepResult<SyncReport> {
        self.phase.send_replace(SyncPhase::Fetching);
        let remote_entries = self
            .remote
            .fetch()
            .await
            .map_err(|e| (SyncPhase::Fetching, e))?;

        self.phase.send_replace(SyncPhase::Merging);
        let (replaced, conflicts, to_push) = {
            let mut store = self.store.lock().await;
            let outcome = merge_entries(store.entries(), &remote_entries);
            let replaced = if outcome.differs_from(store.entries()) {
                store
                    .replace_entries(outcome.merged)
                    .map_err(|e| (SyncPhase::Merging, e))?
            } else {
                false
            };
            let to_push = store
                .pending_changes()
                .then(|| (store.entries().to_vec(), store.revision()));
            (replaced, outcome.conflicts, to_push)
        };
        for conflict in &conflicts {
            info!(
                text = %conflict.text,
                local = %conflict.local_category,
                server = %conflict.server_category,
                "conflict resolved in favor of the server"
            );
        }

        let pushed = match to_push {
            Some((entries, revision)) => {
                self.phase.send_replace(SyncPhase::Pushing);
                self.remote
                    .push(&entries)
                    .await
                    .map_err(|e| (SyncPhase::Pushing, e))?;
                self.store
                    .lock()
                    .await
                    .mark_pushed(revision)
                    .map_err(|e| (SyncPhase::Pushing, e))?;
                true
            }
            None => false,
        };

        self.phase.send_replace(SyncPhase::Committed);
        let synced_at = OffsetDateTime::now_utc();
        let entries = {
            let mut store = self.store.lock().await;
            store
                .record_sync(synced_at)
                .map_err(|e| (SyncPhase::Committed, e))?;
            store.len()
        };

        Ok(SyncReport {
            replaced,
            conflicts,
            pushed,
            entries,
            synced_at,
        })
    }
}

struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
