//! Result records produced by an upload run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kind::ObjectKindConfig;

pub const REPORT_FIELD_GROUP: &str = "group";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryData {
    pub group: String,
}

/// Report entry describing a group that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub summary_text: String,
    pub report_fields: Vec<String>,
    pub data: SummaryData,
}

impl UploadSummary {
    pub fn new(kind: &ObjectKindConfig, group_name: &str) -> Self {
        Self {
            summary_text: kind.summary_text.to_string(),
            report_fields: vec![REPORT_FIELD_GROUP.to_string()],
            data: SummaryData {
                group: group_name.to_string(),
            },
        }
    }
}

/// Outcome of one run. The summary is present only when a write happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUploadResult {
    pub group_uploaded: bool,
    pub summary: Option<UploadSummary>,
}

impl GroupUploadResult {
    /// Existing group left untouched.
    pub fn unchanged() -> Self {
        Self {
            group_uploaded: false,
            summary: None,
        }
    }

    pub fn uploaded(kind: &ObjectKindConfig, group_name: &str) -> Self {
        Self {
            group_uploaded: true,
            summary: Some(UploadSummary::new(kind, group_name)),
        }
    }
}

/// Outputs accumulated over several runs in one batch.
///
/// Each run clears the previous summary of its kind before recording its own,
/// so a skipped run leaves no summary behind for that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub group_uploaded: bool,
    #[serde(flatten)]
    pub summaries: BTreeMap<String, UploadSummary>,
}

impl BatchReport {
    pub fn record(&mut self, kind: &ObjectKindConfig, result: &GroupUploadResult) {
        self.summaries.remove(kind.summary_key);
        self.group_uploaded = result.group_uploaded;
        if let Some(summary) = &result.summary {
            self.summaries
                .insert(kind.summary_key.to_string(), summary.clone());
        }
    }

    pub fn summary(&self, kind: &ObjectKindConfig) -> Option<&UploadSummary> {
        self.summaries.get(kind.summary_key)
    }
}
