//! Error types for the relay server

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// Team, channel or user could not be resolved on the chat host
    #[error("failed to find {kind}: {name}")]
    HostLookup { kind: &'static str, name: String },

    /// The chat host answered with a non-success status
    #[error("chat host returned {status}: {message}")]
    HostApi { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("can't send message to channel: {0}")]
    Notification(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Status event error: {0}")]
    Status(#[from] siprelay_status_core::StatusError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<url::ParseError> for RelayError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
