//! Error types shared across the client.

use thiserror::Error;

/// Errors raised while talking to the REST backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport level failure (connection refused, timeout, invalid body)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("{message} ({status})")]
    Status { status: u16, message: String },

    /// A protected endpoint was called without a credential
    #[error("Unauthorized: no session token, please log in")]
    Unauthorized,

    /// The backend answered with a payload we cannot map
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Reading a local file for upload failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Human readable reason suitable for a notice line.
    pub fn reason(&self) -> String {
        match self {
            GatewayError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors raised by the local JSON stores (session, likes).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors raised while signing in: the backend refused, or the new session
/// could not be written.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Failed to save session: {0}")]
    Store(#[from] StoreError),
}

/// Errors reported by an audio output when it cannot start playback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutputError {
    /// The assigned source has no playable media reference
    #[error("track has no playable media")]
    MissingSource,

    /// The media could not be loaded
    #[error("media unavailable: {0}")]
    Unavailable(String),
}
