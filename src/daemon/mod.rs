mod console;
mod polling;

use crate::core::settings::Settings;
use crate::core::store::ResultStore;
use crate::providers::DeliverooClient;
use crate::tracker::{OrderTracker, SystemClock};
use anyhow::Result;
use std::sync::Arc;

pub use console::{render, ConsoleSink};
pub use polling::PollingLoop;

pub async fn run(settings: Settings, json: bool) -> Result<()> {
    settings.validate()?;

    tracing::info!(
        locale = ?settings.locale,
        baseline_interval_secs = settings.polling.baseline_interval_secs,
        active_interval_secs = settings.polling.active_interval_secs,
        "Starting roo-tracker daemon"
    );

    let store = ResultStore::new();
    let tracker = OrderTracker::new(
        &settings,
        Arc::new(DeliverooClient::new(&settings)),
        Arc::new(ConsoleSink::new(store, json)),
        Arc::new(SystemClock),
    );

    PollingLoop::new(tracker).run_until(shutdown_signal()).await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
