//! Error types for status event interpretation

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The event path did not have 2 (`action/user`) or 3 (`action/user/number`) segments
    #[error("malformed request: expected 2 or 3 path segments, got {segments}")]
    MalformedRequest { segments: usize },
}

impl StatusError {
    /// Whether the caller sent something we cannot interpret
    pub fn is_client_error(&self) -> bool {
        match self {
            StatusError::MalformedRequest { .. } => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatusError>;
