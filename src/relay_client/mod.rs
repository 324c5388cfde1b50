pub mod api;
mod client;
mod core;
mod gateway;
pub mod helpers;
mod models;

pub use client::HttpGateway;
pub use self::core::{
    reduce, CommandDispatcher, PollHandle, PollOutcome, RepeatingTask, Synchronizer,
    DEFAULT_POLL_INTERVAL,
};
pub use gateway::DeviceGateway;
pub use models::{DeviceStatus, RelayAction, RelayId, RelayState, SyncSnapshot};
