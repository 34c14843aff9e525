use crate::core::models::TrackerResult;
use crate::core::store::{ResultSink, ResultStore};
use async_trait::async_trait;

/// Keeps the latest result in a [`ResultStore`] and prints it to stdout
/// whenever it differs from what was last shown.
pub struct ConsoleSink {
    store: ResultStore,
    json: bool,
}

impl ConsoleSink {
    pub fn new(store: ResultStore, json: bool) -> Self {
        Self { store, json }
    }
}

#[async_trait]
impl ResultSink for ConsoleSink {
    async fn publish(&self, result: TrackerResult) {
        let changed = self.store.latest().await.as_ref() != Some(&result);

        if changed {
            match render(&result, self.json) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "Failed to render result"),
            }
        }

        self.store.publish(result).await;
    }
}

pub fn render(result: &TrackerResult, json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string(result);
    }

    let mut line = result.state.clone();
    if !result.attributes.is_empty() {
        let attrs: Vec<String> = result
            .attributes
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        line.push_str(&format!(" ({})", attrs.join(", ")));
    }
    Ok(line)
}
