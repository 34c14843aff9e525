use crate::core::models::TrackerResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Receives each freshly interpreted result. Soft failures publish nothing,
/// so a sink keeps showing its previous value.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn publish(&self, result: TrackerResult);
}

#[derive(Default)]
struct StoreInner {
    latest: Option<TrackerResult>,
    publish_count: u64,
}

/// In-memory sink holding the latest published result.
#[derive(Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    pub async fn latest(&self) -> Option<TrackerResult> {
        self.inner.read().await.latest.clone()
    }

    #[allow(dead_code)]
    pub async fn publish_count(&self) -> u64 {
        self.inner.read().await.publish_count
    }
}

#[async_trait]
impl ResultSink for ResultStore {
    async fn publish(&self, result: TrackerResult) {
        let mut inner = self.inner.write().await;

        if inner.latest.as_ref().map(|r| &r.state) != Some(&result.state) {
            tracing::info!(
                previous = inner.latest.as_ref().map(|r| r.state.as_str()),
                state = %result.state,
                "Order state changed"
            );
        }

        inner.latest = Some(result);
        inner.publish_count = inner.publish_count.saturating_add(1);
    }
}
