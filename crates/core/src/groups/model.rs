//! Domain types for static group uploads.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a remote group.
///
/// Kept opaque: the Jamf Pro API returns ids as strings while the Classic API
/// uses numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Returns `None` for the empty and zero ids the server uses for "no object".
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "0" {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a device that belongs to a group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberId {
    Numeric(i64),
    Opaque(String),
}

impl From<i64> for MemberId {
    fn from(value: i64) -> Self {
        MemberId::Numeric(value)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberId::Numeric(id) => write!(f, "{}", id),
            MemberId::Opaque(id) => f.write_str(id),
        }
    }
}

/// In-memory view of the group being uploaded during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub description: String,
    pub member_ids: BTreeSet<MemberId>,
    pub remote_id: Option<GroupId>,
}

impl Group {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            member_ids: BTreeSet::new(),
            remote_id: None,
        }
    }

    /// Method the next write uses: update when the group exists, create otherwise.
    pub fn write_method(&self) -> WriteMethod {
        if self.remote_id.is_some() {
            WriteMethod::Put
        } else {
            WriteMethod::Post
        }
    }

    pub fn payload(&self) -> GroupPayload<'_> {
        GroupPayload {
            name: &self.name,
            description: &self.description,
            assignments: self.member_ids.iter().collect(),
        }
    }
}

/// Request body sent on create and update.
#[derive(Debug, Serialize)]
pub struct GroupPayload<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub assignments: Vec<&'a MemberId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Post,
    Put,
}

impl WriteMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteMethod::Post => "POST",
            WriteMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for WriteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body of a write response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Outcome of classifying a write response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Retry,
    Fatal,
}
