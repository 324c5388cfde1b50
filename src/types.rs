use thiserror::Error;

/// Errors raised while talking to the relay device or loading configuration.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Device error: {0}")]
    Device(String),
    #[error("Malformed device payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// Connection refused, timeout, DNS and friends.
    pub fn is_transport(&self) -> bool {
        matches!(self, RelayError::Http(_) | RelayError::Io(_))
    }

    /// The device answered, but not with something we can use.
    pub fn is_protocol(&self) -> bool {
        matches!(self, RelayError::Device(_) | RelayError::Malformed(_))
    }
}
