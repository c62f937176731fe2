//! HTTP client for the Jamf Pro and Classic APIs.
//!
//! Implements the collaborator traits of `jamf-sync-core` so a
//! [`JamfClient`] can drive the static group uploader directly.

mod client;
mod error;
mod types;

pub use client::JamfClient;
pub use error::{JamfClientError, Result};
pub use types::*;
