use reqwest::StatusCode;
use thiserror::Error;

/// Soft failures of a single fetch. None of these stop the tracker.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::UnexpectedStatus(_) => "unexpected_status",
            FetchError::MalformedPayload(_) => "malformed_payload",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedPayload(err.to_string())
    }
}

/// Outcome of the one-time credential check.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot connect to the Deliveroo API: {0}")]
    CannotConnect(#[source] reqwest::Error),

    #[error("token rejected by the Deliveroo API (HTTP {0})")]
    InvalidAuth(StatusCode),
}
