use crate::core::locale::Locale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TOKEN_ENV_VAR: &str = "ROO_TRACKER_TOKEN";

const DEFAULT_ORDERS_URL: &str = "https://api.hk.deliveroo.com/consumer/order-history/v1/orders";
const DEFAULT_ORDER_STATUS_URL: &str =
    "https://api.hk.deliveroo.com/consumer/v2-6/consumer_order_statuses";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub token: String,
    pub locale: Locale,
    pub polling: PollingSettings,
    pub multi_order: MultiOrderSettings,
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: String::new(),
            locale: Locale::default(),
            polling: PollingSettings::default(),
            multi_order: MultiOrderSettings::default(),
            api: ApiSettings::default(),
            logging: LoggingSettings::default(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub baseline_interval_secs: u64,
    pub active_interval_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            baseline_interval_secs: 60,
            active_interval_secs: 30,
        }
    }
}

impl PollingSettings {
    pub fn baseline_interval(&self) -> Duration {
        Duration::from_secs(self.baseline_interval_secs)
    }

    pub fn active_interval(&self) -> Duration {
        Duration::from_secs(self.active_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiOrderSettings {
    /// Substring of the advisory text that marks a batched pickup.
    pub advisory_marker: String,
}

impl Default for MultiOrderSettings {
    fn default() -> Self {
        Self {
            advisory_marker: "another order".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub orders_url: String,
    pub order_status_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            orders_url: DEFAULT_ORDERS_URL.to_string(),
            order_status_url: DEFAULT_ORDER_STATUS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    pub journald: bool,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("roo-tracker").join("config.toml"))
    }

    /// Loads from `path`, or the default config location when `None`.
    /// The token environment variable overrides whatever the file holds.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path().context("Could not determine config directory")?,
        };

        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            settings.apply_token_override(token);
        }

        Ok(settings)
    }

    fn apply_token_override(&mut self, token: String) {
        let token = token.trim();
        if !token.is_empty() {
            self.token = token.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            anyhow::bail!(
                "token is required; set it in the config file or via {}",
                TOKEN_ENV_VAR
            );
        }
        if self.polling.baseline_interval_secs == 0 || self.polling.active_interval_secs == 0 {
            anyhow::bail!("polling intervals must be greater than zero");
        }
        if self.polling.active_interval_secs > self.polling.baseline_interval_secs {
            anyhow::bail!(
                "polling.active_interval_secs ({}) must not exceed polling.baseline_interval_secs ({})",
                self.polling.active_interval_secs,
                self.polling.baseline_interval_secs
            );
        }
        if self.multi_order.advisory_marker.is_empty() {
            anyhow::bail!("multi_order.advisory_marker must not be empty");
        }
        Ok(())
    }
}
