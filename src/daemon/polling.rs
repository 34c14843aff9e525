use crate::tracker::OrderTracker;
use std::future::Future;

/// Drives a tracker: tick, wait for the interval the tick asked for, repeat.
pub struct PollingLoop {
    tracker: OrderTracker,
}

impl PollingLoop {
    pub fn new(tracker: OrderTracker) -> Self {
        Self { tracker }
    }

    /// Runs until `shutdown` resolves. An in-flight tick is dropped on shutdown.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(
            interval = ?self.tracker.session().current_interval(),
            "Polling loop started"
        );

        loop {
            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                outcome = self.tracker.tick() => outcome,
            };

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(outcome.next_interval) => {}
            }
        }

        tracing::info!("Polling loop stopped");
    }
}
