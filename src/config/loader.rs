use std::env;
use std::path::Path;

use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::types::RelayError;

use super::{paths, Config};

impl Config {
    /// Load configuration from config.json in the app directory
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        let mut config = match Self::try_load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        };

        if let Ok(custom) = env::var("RELAY_DEVICE_URL") {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                config.device_url = trimmed.to_string();
            }
        }

        info!(
            device = %config.device_url,
            poll_interval_ms = config.poll_interval_ms,
            "Loaded configuration"
        );
        config
    }

    /// Load configuration from an explicit path. A missing file yields defaults.
    pub async fn load_from(path: &Path) -> Result<Self, RelayError> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .await
            .map_err(|err| RelayError::Config(format!("Failed to read config file: {err}")))?;

        let value: Value = serde_json::from_str(&contents)
            .map_err(|err| RelayError::Config(format!("Failed to parse config.json: {err}")))?;

        serde_json::from_value(value)
            .map_err(|err| RelayError::Config(format!("Failed to deserialize config.json: {err}")))
    }

    async fn try_load() -> Result<Self, RelayError> {
        let config_path = paths::get_config_path();
        Self::load_from(&config_path).await
    }
}
