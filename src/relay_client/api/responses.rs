use serde::Deserialize;

use crate::relay_client::models::{DeviceStatus, RelayState};

/// Body of `GET /api/status`.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub relay1: RelayStatus,
    pub relay2: RelayStatus,
}

#[derive(Debug, Deserialize)]
pub struct RelayStatus {
    pub active: bool,
    #[serde(default)]
    pub remaining_seconds: Option<i64>,
}

impl From<&RelayStatus> for RelayState {
    fn from(status: &RelayStatus) -> Self {
        let remaining = status.remaining_seconds.unwrap_or(0).max(0);
        RelayState::new(status.active, remaining as u64)
    }
}

impl From<StatusResponse> for DeviceStatus {
    fn from(response: StatusResponse) -> Self {
        Self {
            relay1: RelayState::from(&response.relay1),
            relay2: RelayState::from(&response.relay2),
        }
    }
}
