mod interpret;

use crate::core::locale::Locale;
use crate::core::models::TrackerResult;
use crate::core::session::TrackerSession;
use crate::core::settings::Settings;
use crate::core::store::ResultSink;
use crate::providers::{FetchError, OrderApi};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

pub use interpret::interpret;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    OrderList,
    OrderStatus,
}

impl FetchStage {
    pub fn name(&self) -> &'static str {
        match self {
            FetchStage::OrderList => "order_list",
            FetchStage::OrderStatus => "order_status",
        }
    }
}

#[derive(Debug)]
pub struct SoftFailure {
    pub stage: FetchStage,
    pub error: FetchError,
}

/// What one tick did: the published result (absent on a soft failure) and
/// how long the scheduler should wait before the next tick.
#[derive(Debug)]
pub struct TickOutcome {
    pub result: Option<TrackerResult>,
    pub failure: Option<SoftFailure>,
    pub next_interval: Duration,
}

/// Polls the order endpoints and keeps the cadence memory between ticks.
///
/// `tick` takes `&mut self`, so a single tracker can never run two ticks at
/// once; the owner drives it from one task.
pub struct OrderTracker {
    api: Arc<dyn OrderApi>,
    sink: Arc<dyn ResultSink>,
    clock: Arc<dyn Clock>,
    locale: Locale,
    advisory_marker: String,
    session: TrackerSession,
}

impl OrderTracker {
    pub fn new(
        settings: &Settings,
        api: Arc<dyn OrderApi>,
        sink: Arc<dyn ResultSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            sink,
            clock,
            locale: settings.locale,
            advisory_marker: settings.multi_order.advisory_marker.clone(),
            session: TrackerSession::new(
                settings.polling.baseline_interval(),
                settings.polling.active_interval(),
            ),
        }
    }

    pub fn session(&self) -> &TrackerSession {
        &self.session
    }

    pub async fn tick(&mut self) -> TickOutcome {
        if self.session.correct_drift(self.clock.now()) {
            tracing::debug!(
                interval = ?self.session.current_interval(),
                "Active order overdue, restoring active polling interval"
            );
        }

        let outcome = match self.poll().await {
            Ok(result) => {
                self.sink.publish(result.clone()).await;
                TickOutcome {
                    result: Some(result),
                    failure: None,
                    next_interval: self.session.current_interval(),
                }
            }
            Err(failure) => {
                tracing::warn!(
                    stage = failure.stage.name(),
                    kind = failure.error.kind(),
                    error = %failure.error,
                    "Order fetch failed, keeping previous state"
                );
                TickOutcome {
                    result: None,
                    failure: Some(failure),
                    next_interval: self.session.current_interval(),
                }
            }
        };

        tracing::debug!(
            order_active = self.session.order_active(),
            next_interval = ?outcome.next_interval,
            "Tick complete"
        );
        outcome
    }

    async fn poll(&mut self) -> Result<TrackerResult, SoftFailure> {
        let orders = match self.api.fetch_orders().await {
            Ok(orders) => orders,
            Err(error) => {
                self.session.record_idle();
                return Err(SoftFailure {
                    stage: FetchStage::OrderList,
                    error,
                });
            }
        };

        let Some(order) = orders.into_iter().next().filter(|o| !o.status.is_terminal()) else {
            self.session.record_idle();
            return Ok(TrackerResult::idle());
        };

        // A failed detail fetch leaves the cadence as it was.
        let detail = self
            .api
            .fetch_order_status(&order.id)
            .await
            .map_err(|error| SoftFailure {
                stage: FetchStage::OrderStatus,
                error,
            })?;

        tracing::debug!(
            order_id = %order.id,
            ui_status = detail.ui_status.as_deref(),
            steps = detail.processing_steps.len(),
            "Fetched order status"
        );

        let result = interpret(&detail, self.locale, &self.advisory_marker);
        self.session.record_active(self.clock.now());
        Ok(result)
    }
}
