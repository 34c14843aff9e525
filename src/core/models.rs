use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STATE_IDLE: &str = "IDLE";
pub const STATE_UNKNOWN: &str = "UNKNOWN";

/// Optional detail keys copied into the published attributes, in this order.
pub const OPTIONAL_ATTRIBUTE_KEYS: [&str; 6] = [
    "eta_message",
    "message",
    "fulfillment_type",
    "updated_at",
    "current_progress_percentage",
    "advisory",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Delivered,
    Other,
}

impl OrderStatus {
    pub fn from_api(raw: Option<&str>) -> Self {
        match raw {
            Some("DELIVERED") => OrderStatus::Delivered,
            _ => OrderStatus::Other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStep {
    /// `None` when the API sent the step without a string title.
    pub title: Option<String>,
    pub is_current: bool,
}

impl ProcessingStep {
    /// The title, unless it is missing or blank.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderStatusDetail {
    pub ui_status: Option<String>,
    pub processing_steps: Vec<ProcessingStep>,
    pub advisory: Option<String>,
    /// Only keys from [`OPTIONAL_ATTRIBUTE_KEYS`] that the API actually sent.
    pub optional_fields: BTreeMap<String, String>,
}

impl OrderStatusDetail {
    /// The step marked current, or the first step when none is marked.
    pub fn current_step(&self) -> Option<&ProcessingStep> {
        self.processing_steps
            .iter()
            .find(|step| step.is_current)
            .or_else(|| self.processing_steps.first())
    }
}

/// Snapshot handed to the sink after a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerResult {
    pub state: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl TrackerResult {
    pub fn idle() -> Self {
        Self {
            state: STATE_IDLE.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    #[allow(dead_code)]
    pub fn is_idle(&self) -> bool {
        self.state == STATE_IDLE
    }
}
