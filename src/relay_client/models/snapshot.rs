use serde::Serialize;

use super::relay::{DeviceStatus, RelayId, RelayState};

/// Point-in-time view of connectivity and both relays.
///
/// Replaced wholesale on every poll outcome; readers only ever get copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SyncSnapshot {
    pub connected: bool,
    pub relay1: RelayState,
    pub relay2: RelayState,
}

impl SyncSnapshot {
    pub fn relay(&self, id: RelayId) -> RelayState {
        match id {
            RelayId::Relay1 => self.relay1,
            RelayId::Relay2 => self.relay2,
        }
    }

    pub fn from_status(status: DeviceStatus) -> Self {
        Self {
            connected: true,
            relay1: status.relay1,
            relay2: status.relay2,
        }
    }

    /// Same relay states, connectivity lost.
    pub fn disconnected(&self) -> Self {
        Self {
            connected: false,
            ..*self
        }
    }
}
