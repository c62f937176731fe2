//! Create-or-update of a static group with bounded retries.

use log::{debug, info, warn};

use crate::errors::{Error, Result};

use super::kind::{api_endpoint, ObjectKindConfig};
use super::model::{Group, StatusClass, WriteMethod};
use super::ports::{HttpTransport, Sleeper, StatusClassifier};
use super::retry::RetryPolicy;

/// Details of a write that the server accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReceipt {
    pub method: WriteMethod,
    pub status: u16,
    pub attempts: u32,
}

/// Sends a group to the server, retrying non-success responses.
pub struct GroupWriter<'a> {
    kind: &'a ObjectKindConfig,
    transport: &'a dyn HttpTransport,
    classifier: &'a dyn StatusClassifier,
    sleeper: &'a dyn Sleeper,
}

impl<'a> GroupWriter<'a> {
    pub fn new(
        kind: &'a ObjectKindConfig,
        transport: &'a dyn HttpTransport,
        classifier: &'a dyn StatusClassifier,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            kind,
            transport,
            classifier,
            sleeper,
        }
    }

    /// `PUT {endpoint}/{id}` for an existing group, `POST {endpoint}` otherwise.
    fn target_url(&self, base_url: &str, group: &Group) -> Result<String> {
        let endpoint = api_endpoint(self.kind.static_object_type).ok_or_else(|| {
            Error::config(format!(
                "No API endpoint for object type {}",
                self.kind.static_object_type
            ))
        })?;
        Ok(match &group.remote_id {
            Some(id) => format!("{}/{}/{}", base_url, endpoint, id),
            None => format!("{}/{}", base_url, endpoint),
        })
    }

    /// Write `group` exactly as given; membership is never altered here.
    pub async fn upsert(
        &self,
        base_url: &str,
        token: &str,
        group: &Group,
        policy: &RetryPolicy,
    ) -> Result<WriteReceipt> {
        let display_name = self.kind.display_name;
        let body = serde_json::to_string(&group.payload())?;
        debug!("[StaticGroup] {} data: {}", display_name, body);

        let method = group.write_method();
        let url = self.target_url(base_url, group)?;
        info!("[StaticGroup] Uploading {}...", display_name);

        let mut attempt = 0u32;
        loop {
            attempt = attempt.saturating_add(1);
            debug!("[StaticGroup] {} upload attempt {}", display_name, attempt);

            let (class, status) = match self
                .transport
                .request(method, &url, token, body.clone())
                .await
            {
                Ok(response) => (
                    self.classifier
                        .classify(&response, display_name, &group.name, method),
                    Some(response.status),
                ),
                Err(err) => {
                    warn!("[StaticGroup] {} {} to {} failed: {}", display_name, method, url, err);
                    (StatusClass::Retry, None)
                }
            };

            match (class, status) {
                (StatusClass::Success, Some(status)) => {
                    return Ok(WriteReceipt {
                        method,
                        status,
                        attempts: attempt,
                    });
                }
                (StatusClass::Fatal, Some(status)) => {
                    return Err(Error::Rejected {
                        display_name,
                        name: group.name.clone(),
                        method,
                        status,
                    });
                }
                _ => {}
            }

            if attempt >= policy.max_tries() {
                warn!(
                    "[StaticGroup] {} upload did not succeed after {} attempts",
                    display_name,
                    policy.max_tries()
                );
                return Err(Error::RetryExhausted {
                    display_name,
                    name: group.name.clone(),
                    attempts: attempt,
                    last_status: status,
                });
            }

            let delay = policy.retry_delay();
            info!(
                "[StaticGroup] Retrying {} '{}' in {}s (attempt {}/{})",
                display_name,
                group.name,
                delay.as_secs(),
                attempt + 1,
                policy.max_tries()
            );
            self.sleeper.sleep(delay).await;
        }
    }
}
