mod requests;
mod responses;

pub use requests::RelayCommand;
pub use responses::{RelayStatus, StatusResponse};

pub const STATUS_PATH: &str = "/api/status";
pub const RELAY_PATH: &str = "/api/relay";
