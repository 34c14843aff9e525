mod deliveroo;
mod error;

use crate::core::models::{OrderStatusDetail, OrderSummary};
use async_trait::async_trait;

pub use deliveroo::DeliverooClient;
pub use error::{FetchError, SetupError};

/// Authenticated access to the order endpoints.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Most recent orders first; the tracker only asks for one.
    async fn fetch_orders(&self) -> Result<Vec<OrderSummary>, FetchError>;

    async fn fetch_order_status(&self, order_id: &str) -> Result<OrderStatusDetail, FetchError>;
}
