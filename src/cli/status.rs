use crate::core::models::TrackerResult;
use crate::core::settings::Settings;
use crate::core::store::ResultStore;
use crate::daemon::render;
use crate::providers::DeliverooClient;
use crate::tracker::{OrderTracker, SystemClock, TickOutcome};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct StatusOutput {
    #[serde(flatten)]
    result: TrackerResult,
    order_active: bool,
    next_poll_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_update: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds")]
    fetched_at: DateTime<Utc>,
}

pub async fn run(settings: Settings, json: bool) -> Result<()> {
    settings.validate()?;

    let mut tracker = OrderTracker::new(
        &settings,
        Arc::new(DeliverooClient::new(&settings)),
        Arc::new(ResultStore::new()),
        Arc::new(SystemClock),
    );

    let outcome = tracker.tick().await;
    let order_active = tracker.session().order_active();
    let result = into_result(outcome)?;

    if json {
        let output = StatusOutput {
            result,
            order_active,
            next_poll_secs: tracker.session().current_interval().as_secs(),
            last_update: tracker.session().last_successful_update(),
            fetched_at: Utc::now(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render(&result, false)?);
    }

    Ok(())
}

fn into_result(outcome: TickOutcome) -> Result<TrackerResult> {
    if let Some(failure) = outcome.failure {
        anyhow::bail!(
            "Failed to fetch {}: {}",
            failure.stage.name().replace('_', " "),
            failure.error
        );
    }
    outcome
        .result
        .ok_or_else(|| anyhow::anyhow!("Tick produced no result"))
}
