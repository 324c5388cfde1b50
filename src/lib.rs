//! Client-side mirror of a two-relay network device.
//!
//! [`Synchronizer`] polls the device and owns the [`SyncSnapshot`];
//! [`CommandDispatcher`] sends toggle commands and forces a refresh.

pub mod config;
pub mod relay_client;
pub mod types;

pub use config::Config;
pub use relay_client::{
    CommandDispatcher, DeviceGateway, HttpGateway, RelayAction, RelayId, RelayState,
    SyncSnapshot, Synchronizer,
};
pub use types::RelayError;
