//! Scheduling loop and lifecycle handle for the live update worker.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::LiveUpdateWorker;

/// Running worker task.
///
/// Dropping the handle leaves the task running until its token is cancelled.
#[derive(Debug)]
pub struct LiveUpdateHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl LiveUpdateHandle {
    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop scheduling ticks and wait for the task to exit. A tick already
    /// in flight runs to completion first.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(error) = self.task.await {
            warn!(%error, "live update task ended abnormally");
        }
    }
}

impl LiveUpdateWorker {
    /// Run the worker on the current runtime until `token` is cancelled.
    pub fn spawn(self, token: CancellationToken) -> LiveUpdateHandle {
        let task = tokio::spawn(self.run(token.clone()));
        LiveUpdateHandle { token, task }
    }

    /// Tick every `interval` until `token` is cancelled.
    ///
    /// The first tick fires one interval after start. Cancellation is only
    /// observed between ticks.
    pub async fn run(mut self, token: CancellationToken) {
        let period = self.settings.interval.max(Duration::from_millis(1));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // `interval` completes its first tick immediately.
        ticker.tick().await;
        info!(interval_ms = period.as_millis(), "live updates started");

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => {
                    let report = self.tick().await;
                    debug!(
                        writes = report.writes.len(),
                        members = report.members_touched(),
                        skipped = report.skipped,
                        failures = report.failures,
                        "live update tick finished"
                    );
                }
            }
        }
        info!("live updates stopped");
    }
}
