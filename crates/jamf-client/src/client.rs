//! Jamf Pro API client used by the static group uploader.
//!
//! Token requests and static group lookups go to the Jamf Pro API; group
//! membership is read from the Classic API, which still exposes the full
//! member records.

use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use jamf_sync_core::groups::{
    api_endpoint, is_classic_object_type, AuthProvider, GroupId, HttpResponse, HttpTransport,
    ObjectDirectory, WriteMethod,
};
use jamf_sync_core::Credentials;

use crate::error::{JamfClientError, Result};
use crate::types::*;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;
const SEARCH_PAGE_SIZE: &str = "1000";
const APPLICATION_JSON: &str = "application/json";

fn truncate_for_log(body: &str) -> String {
    match body.char_indices().nth(MAX_LOG_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Status and body of a completed request.
struct RawResponse {
    status: StatusCode,
    body: String,
}

impl RawResponse {
    async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            trace!("[JamfApi] HTTP {} ({} bytes)", status, body.len());
        } else {
            debug!("[JamfApi] HTTP {}: {}", status, truncate_for_log(&body));
        }
        Ok(Self { status, body })
    }

    /// Non-success becomes an API error carrying Jamf's error causes when the body has them.
    fn error_for_status(&self) -> Result<()> {
        if self.status.is_success() {
            return Ok(());
        }
        let message = serde_json::from_str::<ApiErrorResponse>(&self.body)
            .ok()
            .and_then(|error| error.message())
            .unwrap_or_else(|| format!("Request failed: {}", truncate_for_log(&self.body)));
        Err(JamfClientError::api(self.status.as_u16(), message))
    }

    fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.error_for_status()?;
        serde_json::from_str(&self.body).map_err(|e| {
            JamfClientError::UnexpectedResponse(format!(
                "HTTP {} body does not match the expected shape: {}",
                self.status, e
            ))
        })
    }
}

/// Client for a Jamf Pro server.
///
/// The base URL is passed per call so one client can serve several servers.
#[derive(Debug, Clone)]
pub struct JamfClient {
    client: reqwest::Client,
}

impl Default for JamfClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JamfClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    fn authorized(request: RequestBuilder, token: &str) -> RequestBuilder {
        request.bearer_auth(token).header(ACCEPT, APPLICATION_JSON)
    }

    fn endpoint(object_type: &str) -> Result<&'static str> {
        api_endpoint(object_type).ok_or_else(|| {
            JamfClientError::invalid_request(format!("Unknown object type {}", object_type))
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────────

    /// Obtain a bearer token.
    ///
    /// POST /api/oauth/token (client credentials) or POST /api/v1/auth/token (basic)
    pub async fn request_token(&self, base_url: &str, credentials: &Credentials) -> Result<String> {
        let as_auth_error = |err: JamfClientError| match err {
            JamfClientError::Api { status, message } => {
                JamfClientError::auth(format!("token request failed ({}): {}", status, message))
            }
            other => other,
        };

        match credentials {
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => {
                let url = format!("{}/api/oauth/token", base_url);
                debug!("[JamfApi] Requesting token for API client {}", client_id);
                let response = self
                    .client
                    .post(&url)
                    .form(&[
                        ("client_id", client_id.as_str()),
                        ("grant_type", "client_credentials"),
                        ("client_secret", client_secret.as_str()),
                    ])
                    .send()
                    .await?;
                let token: OAuthTokenResponse = RawResponse::read(response)
                    .await?
                    .json()
                    .map_err(as_auth_error)?;
                debug!("[JamfApi] Token received (expires_in={:?})", token.expires_in);
                Ok(token.access_token)
            }
            Credentials::Basic { username, password } => {
                let url = format!("{}/api/v1/auth/token", base_url);
                debug!("[JamfApi] Requesting token for user {}", username);
                let response = self
                    .client
                    .post(&url)
                    .basic_auth(username, Some(password))
                    .header(ACCEPT, APPLICATION_JSON)
                    .send()
                    .await?;
                let token: BasicTokenResponse = RawResponse::read(response)
                    .await?
                    .json()
                    .map_err(as_auth_error)?;
                debug!("[JamfApi] Token received (expires={:?})", token.expires);
                Ok(token.token)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Objects
    // ─────────────────────────────────────────────────────────────────────────

    /// Find the id of the object with exactly this name.
    ///
    /// GET /{endpoint}?page=0&page-size=1000&sort=id&filter=name=="{name}"
    pub async fn find_object_id(
        &self,
        base_url: &str,
        object_type: &str,
        name: &str,
        token: &str,
    ) -> Result<Option<GroupId>> {
        let url = format!("{}/{}", base_url, Self::endpoint(object_type)?);
        let filter = format!("name==\"{}\"", name.replace('"', "\\\""));

        let response = Self::authorized(self.client.get(&url), token)
            .query(&[
                ("page", "0"),
                ("page-size", SEARCH_PAGE_SIZE),
                ("sort", "id"),
                ("filter", filter.as_str()),
            ])
            .send()
            .await?;
        let page: SearchResults = RawResponse::read(response).await?.json()?;

        let id = page
            .results
            .iter()
            .find(|item| item.name == name)
            .and_then(NamedObject::id_string)
            .and_then(GroupId::new);
        debug!("[JamfApi] Lookup of {} '{}' returned {:?}", object_type, name, id);
        Ok(id)
    }

    /// Records under `field_path` of a Classic API object.
    ///
    /// GET /JSSResource/{collection}/id/{id}
    pub async fn get_object_field(
        &self,
        base_url: &str,
        object_type: &str,
        id: &GroupId,
        field_path: &str,
        token: &str,
    ) -> Result<Vec<serde_json::Value>> {
        if !is_classic_object_type(object_type) {
            return Err(JamfClientError::invalid_request(format!(
                "Field reads need a Classic API object type, got {}",
                object_type
            )));
        }
        let url = format!(
            "{}/{}/id/{}",
            base_url,
            Self::endpoint(object_type)?,
            urlencoding::encode(id.as_str())
        );

        let response = Self::authorized(self.client.get(&url), token)
            .send()
            .await?;
        let object: serde_json::Value = RawResponse::read(response).await?.json()?;

        let field = object
            .get(object_type)
            .and_then(|inner| inner.get(field_path));
        trace!("[JamfApi] {} {} field {}: {:?}", object_type, id, field_path, field);
        match field {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(serde_json::Value::Array(records)) => Ok(records.clone()),
            Some(other) => Err(JamfClientError::UnexpectedResponse(format!(
                "{} of {} {} is not a list: {}",
                field_path, object_type, id, other
            ))),
        }
    }

    /// Send a JSON write and hand back the raw status; non-success is not an error here.
    pub async fn send_json(
        &self,
        method: WriteMethod,
        url: &str,
        token: &str,
        body: String,
    ) -> Result<HttpResponse> {
        let http_method = match method {
            WriteMethod::Post => Method::POST,
            WriteMethod::Put => Method::PUT,
        };

        let response = Self::authorized(self.client.request(http_method, url), token)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(body)
            .send()
            .await?;
        let raw = RawResponse::read(response).await?;
        if let Err(err) = raw.error_for_status() {
            debug!("[JamfApi] {} {} not accepted: {}", method, url, err);
        }

        Ok(HttpResponse {
            status: raw.status.as_u16(),
            body: raw.body,
        })
    }
}

#[async_trait]
impl AuthProvider for JamfClient {
    async fn authenticate(
        &self,
        base_url: &str,
        credentials: &Credentials,
    ) -> jamf_sync_core::Result<String> {
        Ok(self.request_token(base_url, credentials).await?)
    }
}

#[async_trait]
impl ObjectDirectory for JamfClient {
    async fn find_id_by_name(
        &self,
        base_url: &str,
        object_type: &str,
        name: &str,
        token: &str,
    ) -> jamf_sync_core::Result<Option<GroupId>> {
        Ok(self.find_object_id(base_url, object_type, name, token).await?)
    }

    async fn read_field(
        &self,
        base_url: &str,
        object_type: &str,
        id: &GroupId,
        field_path: &str,
        token: &str,
    ) -> jamf_sync_core::Result<Vec<serde_json::Value>> {
        Ok(self
            .get_object_field(base_url, object_type, id, field_path, token)
            .await?)
    }
}

#[async_trait]
impl HttpTransport for JamfClient {
    async fn request(
        &self,
        method: WriteMethod,
        url: &str,
        token: &str,
        body: String,
    ) -> jamf_sync_core::Result<HttpResponse> {
        Ok(self.send_json(method, url, token, body).await?)
    }
}
