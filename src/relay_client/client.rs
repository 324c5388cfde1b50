use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::types::RelayError;

use super::api::{RelayCommand, StatusResponse, RELAY_PATH, STATUS_PATH};
use super::gateway::DeviceGateway;
use super::models::DeviceStatus;

/// reqwest-backed gateway to a single relay device.
#[derive(Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    /// Prepare an HTTP client for the device named in the config.
    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(RelayError::Http)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.device_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, RelayError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(RelayError::Http)?;

        if !response.status().is_success() {
            return Err(RelayError::Device(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(RelayError::Http)?;
        serde_json::from_slice(&body).map_err(RelayError::Malformed)
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> Result<(), RelayError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(RelayError::Http)?;

        if !response.status().is_success() {
            return Err(RelayError::Device(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl DeviceGateway for HttpGateway {
    async fn fetch_status(&self) -> Result<DeviceStatus, RelayError> {
        let status: StatusResponse = self.get_json(STATUS_PATH).await?;
        Ok(DeviceStatus::from(status))
    }

    async fn send_command(&self, command: RelayCommand) -> Result<(), RelayError> {
        debug!(relay = command.relay, action = %command.action, "Sending relay command");
        self.post_json(RELAY_PATH, &command).await
    }
}

/// Bare hosts get plain HTTP, the way the device ships.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
