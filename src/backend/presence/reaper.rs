/**
 * Inactivity Reaper
 *
 * Periodically calls [`PresenceTracker::reap`] so that participants who
 * stopped sending heartbeats leave the room.
 *
 * # Scheduling
 *
 * The first pass runs one full period after `spawn`, then every period.
 * A participant that goes silent is removed somewhere between `threshold`
 * and `threshold + period` later.
 *
 * # Error isolation
 *
 * A failed pass is logged and dropped. The next tick runs regardless.
 */

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::backend::presence::tracker::PresenceTracker;

/// Default time between reap passes
pub const DEFAULT_REAP_INTERVAL: Duration = Duration::from_secs(15);

/// Default inactivity allowed before a participant is reaped
pub const DEFAULT_INACTIVITY_THRESHOLD: Duration = Duration::from_secs(10);

/// Owns the reap schedule
#[derive(Clone)]
pub struct Reaper {
    tracker: PresenceTracker,
    interval: Duration,
    threshold: Duration,
}

impl Reaper {
    pub fn new(tracker: PresenceTracker, interval: Duration, threshold: Duration) -> Self {
        Self {
            tracker,
            interval,
            threshold,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Run a single reap pass
    ///
    /// Returns how many participants were removed. Errors are logged and
    /// reported as zero removals.
    pub async fn run_cycle(&self) -> usize {
        match self.tracker.reap(self.threshold).await {
            Ok(removed) => {
                if !removed.is_empty() {
                    tracing::info!("Reaped {} inactive participant(s): {:?}", removed.len(), removed);
                }
                removed.len()
            }
            Err(e) => {
                tracing::error!("Reap cycle failed: {}", e);
                0
            }
        }
    }

    /// Start the schedule on the current tokio runtime
    pub fn spawn(self) -> ReaperHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                "Reaper started (every {:?}, threshold {:?})",
                self.interval,
                self.threshold
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_cycle().await;
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Reaper stopped");
                        break;
                    }
                }
            }
        });

        ReaperHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a running [`Reaper`]
pub struct ReaperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Stop the schedule and wait for the task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::error!("Reaper task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
