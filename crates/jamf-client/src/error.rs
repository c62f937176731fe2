//! Error types for the Jamf Pro API client.

use thiserror::Error;

/// Result type alias for Jamf API operations.
pub type Result<T> = std::result::Result<T, JamfClientError>;

/// Errors that can occur while talking to a Jamf Pro server.
#[derive(Debug, Error)]
pub enum JamfClientError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response from the server
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (unknown object type, bad header value, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Authentication error (token endpoint refused the credentials)
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl JamfClientError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<JamfClientError> for jamf_sync_core::Error {
    fn from(err: JamfClientError) -> Self {
        match err {
            JamfClientError::Auth(message) => jamf_sync_core::Error::auth(message),
            JamfClientError::InvalidRequest(message) => jamf_sync_core::Error::Config(message),
            JamfClientError::Json(err) => jamf_sync_core::Error::Json(err),
            other => jamf_sync_core::Error::api(other.status_code(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jamf_sync_core::ErrorKind;

    #[test]
    fn api_error_keeps_status_in_core_error() {
        let err: jamf_sync_core::Error = JamfClientError::api(404, "not found").into();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[test]
    fn auth_error_maps_to_core_auth() {
        let err: jamf_sync_core::Error = JamfClientError::auth("bad secret").into();
        assert!(matches!(err, jamf_sync_core::Error::Auth(message) if message == "bad secret"));
    }
}
