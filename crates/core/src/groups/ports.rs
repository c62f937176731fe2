//! Collaborator seams consumed by the group uploader.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::errors::Result;

use super::model::{GroupId, HttpResponse, StatusClass, WriteMethod};

/// Exchanges credentials for a bearer token.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, base_url: &str, credentials: &Credentials) -> Result<String>;
}

/// Read access to remote objects.
#[async_trait]
pub trait ObjectDirectory: Send + Sync {
    /// Id of the object with exactly this name; first match wins.
    async fn find_id_by_name(
        &self,
        base_url: &str,
        object_type: &str,
        name: &str,
        token: &str,
    ) -> Result<Option<GroupId>>;

    /// Records stored under `field_path` of the object. Missing field yields an empty list.
    async fn read_field(
        &self,
        base_url: &str,
        object_type: &str,
        id: &GroupId,
        field_path: &str,
        token: &str,
    ) -> Result<Vec<serde_json::Value>>;
}

/// Sends a JSON write request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(
        &self,
        method: WriteMethod,
        url: &str,
        token: &str,
        body: String,
    ) -> Result<HttpResponse>;
}

pub trait StatusClassifier: Send + Sync {
    fn classify(
        &self,
        response: &HttpResponse,
        display_name: &str,
        name: &str,
        method: WriteMethod,
    ) -> StatusClass;
}

/// Turns a templated name into a concrete one.
pub trait NameTemplate: Send + Sync {
    fn resolve(&self, raw_name: &str) -> String;
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
