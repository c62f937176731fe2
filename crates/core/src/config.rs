//! Connection settings for a Jamf Pro server.

use std::fmt;

use crate::errors::{Error, Result};

/// Credentials accepted by the Jamf Pro token endpoints.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API client id and secret (OAuth client credentials grant)
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
    /// Account username and password (basic auth token endpoint)
    Basic { username: String, password: String },
}

impl Credentials {
    /// Pick credentials from optional inputs, preferring an API client when
    /// both a client id and a secret are present.
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        if let (Some(client_id), Some(client_secret)) = (present(client_id), present(client_secret))
        {
            return Ok(Self::ClientCredentials {
                client_id,
                client_secret,
            });
        }

        match (present(username), present(password)) {
            (Some(username), Some(password)) => Ok(Self::Basic { username, password }),
            _ => Err(Error::config(
                "No credentials supplied: provide a client ID and secret or an API username and password",
            )),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Server URL plus credentials used for one run.
#[derive(Debug, Clone)]
pub struct JamfConnection {
    url: Option<String>,
    pub credentials: Credentials,
}

impl JamfConnection {
    pub fn new(url: Option<String>, credentials: Credentials) -> Self {
        let url = url
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        Self { url, credentials }
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| Error::config("Jamf Pro URL not supplied"))
    }
}
