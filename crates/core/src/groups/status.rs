//! Default classification of write responses.

use log::{info, warn};

use super::model::{HttpResponse, StatusClass, WriteMethod};
use super::ports::StatusClassifier;

/// Classify a write status code.
///
/// Auth failures and conflicts (a group with that name already exists) end
/// the retry loop; every other non-success status is retried.
pub fn classify_write_status(status: u16) -> StatusClass {
    match status {
        200 | 201 | 204 => StatusClass::Success,
        401 | 403 | 409 => StatusClass::Fatal,
        _ => StatusClass::Retry,
    }
}

/// Classifier used unless the caller injects another one. Logs each outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct JamfStatusClassifier;

impl StatusClassifier for JamfStatusClassifier {
    fn classify(
        &self,
        response: &HttpResponse,
        display_name: &str,
        name: &str,
        method: WriteMethod,
    ) -> StatusClass {
        let action = match method {
            WriteMethod::Post => "upload",
            WriteMethod::Put => "update",
        };
        let class = classify_write_status(response.status);
        match class {
            StatusClass::Success => {
                info!("[StaticGroup] {} '{}' {} successful", display_name, name, action);
            }
            StatusClass::Fatal => {
                warn!(
                    "[StaticGroup] {} '{}' {} rejected, not retrying (HTTP {})",
                    display_name, name, action, response.status
                );
            }
            StatusClass::Retry => {
                warn!(
                    "[StaticGroup] {} '{}' {} failed (HTTP {})",
                    display_name, name, action, response.status
                );
            }
        }
        class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_write_status_for_retry_policy() {
        assert_eq!(classify_write_status(200), StatusClass::Success);
        assert_eq!(classify_write_status(201), StatusClass::Success);
        assert_eq!(classify_write_status(204), StatusClass::Success);
        assert_eq!(classify_write_status(401), StatusClass::Fatal);
        assert_eq!(classify_write_status(403), StatusClass::Fatal);
        assert_eq!(classify_write_status(409), StatusClass::Fatal);
        assert_eq!(classify_write_status(500), StatusClass::Retry);
        assert_eq!(classify_write_status(400), StatusClass::Retry);
    }

    #[test]
    fn classifier_delegates_to_status_table() {
        let response = HttpResponse {
            status: 503,
            body: String::new(),
        };
        let class =
            JamfStatusClassifier.classify(&response, "Computer Group", "Engineers", WriteMethod::Put);
        assert_eq!(class, StatusClass::Retry);
    }
}
