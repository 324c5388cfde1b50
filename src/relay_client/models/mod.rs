mod relay;
mod snapshot;

pub use relay::{DeviceStatus, RelayAction, RelayId, RelayState};
pub use snapshot::SyncSnapshot;
