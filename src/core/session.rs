use chrono::{DateTime, Utc};
use std::time::Duration;

/// Cadence memory carried between ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSession {
    baseline_interval: Duration,
    active_interval: Duration,
    current_interval: Duration,
    order_active: bool,
    last_successful_update: Option<DateTime<Utc>>,
}

impl TrackerSession {
    pub fn new(baseline_interval: Duration, active_interval: Duration) -> Self {
        Self {
            baseline_interval,
            active_interval,
            current_interval: baseline_interval,
            order_active: false,
            last_successful_update: None,
        }
    }

    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    pub fn order_active(&self) -> bool {
        self.order_active
    }

    pub fn last_successful_update(&self) -> Option<DateTime<Utc>> {
        self.last_successful_update
    }

    /// Pulls the cadence back to the active interval when an active order
    /// has gone longer than that interval without a successful update.
    /// Returns true when the interval was changed.
    ///
    /// Guards against a scheduler that let the cadence drift; `record_idle`
    /// and `record_active` alone never leave an active order on the baseline.
    pub fn correct_drift(&mut self, now: DateTime<Utc>) -> bool {
        if !self.order_active {
            return false;
        }
        let Some(last) = self.last_successful_update else {
            return false;
        };

        let elapsed = now.signed_duration_since(last).to_std().unwrap_or_default();
        if elapsed > self.active_interval && self.current_interval != self.active_interval {
            self.current_interval = self.active_interval;
            return true;
        }
        false
    }

    /// No order in flight, or the order list could not be fetched.
    pub fn record_idle(&mut self) {
        self.order_active = false;
        self.current_interval = self.baseline_interval;
    }

    pub fn record_active(&mut self, now: DateTime<Utc>) {
        self.order_active = true;
        self.current_interval = self.active_interval;
        self.last_successful_update = Some(now);
    }

    #[cfg(test)]
    pub(crate) fn set_current_interval(&mut self, interval: Duration) {
        self.current_interval = interval;
    }
}
