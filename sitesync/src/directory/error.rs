//! Error types for the remote directory.

use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors returned by a [`DirectoryClient`](super::DirectoryClient).
///
/// Every variant is fatal to a sync run; there is no retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request never produced a response.
    #[error("{method} {url} failed: {reason}")]
    Transport {
        method: String,
        url: String,
        reason: String,
    },

    /// The service answered with an unexpected status.
    #[error("{method} {url} returned HTTP {status}{}", message_suffix(.message))]
    Status {
        method: String,
        url: String,
        status: u16,
        message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

impl DirectoryError {
    /// HTTP status of a [`DirectoryError::Status`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            DirectoryError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
