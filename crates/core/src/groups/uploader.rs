//! End-to-end upload of one static group.

use std::sync::Arc;

use log::{debug, info};

use crate::config::JamfConnection;
use crate::errors::Result;

use super::kind::ObjectKindConfig;
use super::membership::read_existing_members;
use super::model::Group;
use super::ports::{
    AuthProvider, HttpTransport, NameTemplate, ObjectDirectory, Sleeper, StatusClassifier,
    TokioSleeper,
};
use super::retry::RetryPolicy;
use super::status::JamfStatusClassifier;
use super::summary::GroupUploadResult;
use super::template::KeySubstitution;
use super::writer::GroupWriter;

/// Inputs for one upload run.
#[derive(Debug, Clone, Default)]
pub struct GroupUploadRequest {
    /// Group name, may contain `%KEY%` tokens
    pub group_name: String,
    pub description: String,
    /// Overwrite a group that already exists
    pub replace_group: bool,
    /// Drop existing members instead of carrying them over
    pub clear_assignments: bool,
    pub sleep_seconds: u64,
    /// Raw value; anything outside 1..=10 falls back to 5
    pub max_tries: Option<String>,
}

/// Ensures a static group of a given kind exists on the server.
pub struct StaticGroupUploader {
    kind: ObjectKindConfig,
    auth: Arc<dyn AuthProvider>,
    directory: Arc<dyn ObjectDirectory>,
    transport: Arc<dyn HttpTransport>,
    classifier: Arc<dyn StatusClassifier>,
    templater: Arc<dyn NameTemplate>,
    sleeper: Arc<dyn Sleeper>,
}

impl StaticGroupUploader {
    /// Uploader backed by one API client, with default classifier, templater and sleeper.
    pub fn new<C>(kind: ObjectKindConfig, client: Arc<C>) -> Self
    where
        C: AuthProvider + ObjectDirectory + HttpTransport + 'static,
    {
        Self {
            kind,
            auth: client.clone(),
            directory: client.clone(),
            transport: client,
            classifier: Arc::new(JamfStatusClassifier),
            templater: Arc::new(KeySubstitution::default()),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn StatusClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_templater(mut self, templater: Arc<dyn NameTemplate>) -> Self {
        self.templater = templater;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Create the group, update it, or leave an existing one alone.
    pub async fn run(
        &self,
        connection: &JamfConnection,
        request: &GroupUploadRequest,
    ) -> Result<GroupUploadResult> {
        let display_name = self.kind.display_name;
        let policy = RetryPolicy::new(request.max_tries.as_deref(), request.sleep_seconds);
        debug!(
            "[StaticGroup] {} retry policy: max_tries={}, sleep={}s",
            display_name,
            policy.max_tries(),
            policy.sleep_seconds()
        );

        let group_name = self.templater.resolve(&request.group_name);
        let base_url = connection.base_url()?;
        info!("[StaticGroup] Checking for existing '{}' on {}", group_name, base_url);

        let token = self
            .auth
            .authenticate(base_url, &connection.credentials)
            .await?;

        let mut group = Group::new(group_name, request.description.clone());
        group.remote_id = self
            .directory
            .find_id_by_name(base_url, self.kind.static_object_type, &group.name, &token)
            .await?;

        if let Some(object_id) = &group.remote_id {
            info!(
                "[StaticGroup] {} '{}' already exists: ID {}",
                display_name, group.name, object_id
            );
            if !request.replace_group {
                info!(
                    "[StaticGroup] Not replacing existing {}. Use replace_group='True' to enforce.",
                    display_name
                );
                return Ok(GroupUploadResult::unchanged());
            }
            info!(
                "[StaticGroup] Replacing existing {} as 'replace_group' is set to True",
                display_name
            );
            if request.clear_assignments {
                info!("[StaticGroup] Clearing existing assignments of {}", display_name);
            } else {
                group.member_ids = read_existing_members(
                    self.directory.as_ref(),
                    &self.kind,
                    base_url,
                    object_id,
                    &token,
                )
                .await?;
            }
        }

        let writer = GroupWriter::new(
            &self.kind,
            self.transport.as_ref(),
            self.classifier.as_ref(),
            self.sleeper.as_ref(),
        );
        let receipt = writer.upsert(base_url, &token, &group, &policy).await?;
        debug!(
            "[StaticGroup] {} '{}' written with {} (HTTP {}) after {} attempt(s)",
            display_name, group.name, receipt.method, receipt.status, receipt.attempts
        );

        if let Some(delay) = policy.pacing_delay() {
            self.sleeper.sleep(delay).await;
        }

        Ok(GroupUploadResult::uploaded(&self.kind, &group.name))
    }
}
