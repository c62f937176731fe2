//! Error types for static group synchronization.

use thiserror::Error;

use crate::groups::WriteMethod;

/// Result type alias for group sync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classification handed to batch callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    RetryExhausted,
    Rejected,
    Remote,
}

/// Errors that can occur while uploading a static group.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input, detected before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token acquisition failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Failure reported by the server or the transport outside the write loop
    #[error("API error ({}): {message}", status_label(.status, "no status"))]
    Api { status: Option<u16>, message: String },

    /// Every attempt classified as non-success
    #[error(
        "{display_name} '{name}' upload did not succeed after {attempts} attempts (last HTTP status: {})",
        status_label(.last_status, "none")
    )]
    RetryExhausted {
        display_name: &'static str,
        name: String,
        attempts: u32,
        last_status: Option<u16>,
    },

    /// The server answered with a status that retrying cannot fix
    #[error("{display_name} '{name}' {method} rejected with HTTP {status}")]
    Rejected {
        display_name: &'static str,
        name: String,
        method: WriteMethod,
        status: u16,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_label(status: &Option<u16>, missing: &str) -> String {
    status
        .map(|s| s.to_string())
        .unwrap_or_else(|| missing.to_string())
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an API error from an optional status and message
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::RetryExhausted { last_status, .. } => *last_status,
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Json(_) => ErrorKind::Configuration,
            Self::RetryExhausted { .. } => ErrorKind::RetryExhausted,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Auth(_) | Self::Api { .. } => ErrorKind::Remote,
        }
    }
}
