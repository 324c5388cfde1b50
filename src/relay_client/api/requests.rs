use serde::Serialize;

use crate::relay_client::models::{RelayAction, RelayId};

/// Body of `POST /api/relay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelayCommand {
    pub relay: u8,
    pub action: RelayAction,
}

impl RelayCommand {
    pub fn new(relay: RelayId, action: RelayAction) -> Self {
        Self {
            relay: relay.number(),
            action,
        }
    }

    pub fn relay_id(&self) -> Option<RelayId> {
        RelayId::from_number(self.relay)
    }
}
