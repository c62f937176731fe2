//! Core of the Jamf static group uploader.
//!
//! Holds the upsert protocol for computer and mobile device static groups and
//! the collaborator traits an API client implements.

pub mod config;
pub mod errors;
pub mod groups;

pub use config::{Credentials, JamfConnection};
pub use errors::{Error, ErrorKind, Result};
