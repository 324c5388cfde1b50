use async_trait::async_trait;

use crate::types::RelayError;

use super::api::RelayCommand;
use super::models::DeviceStatus;

/// Network access to the relay device.
///
/// Timeouts belong to the implementation; callers treat a timed out call like
/// any other failure.
#[async_trait]
pub trait DeviceGateway: Send + Sync {
    /// `GET /api/status`
    async fn fetch_status(&self) -> Result<DeviceStatus, RelayError>;

    /// `POST /api/relay`. Only success or failure of the call is reported.
    async fn send_command(&self, command: RelayCommand) -> Result<(), RelayError>;
}
