//! Wire types for the Jamf Pro and Classic APIs.

use serde::Deserialize;

/// Response of `POST /api/oauth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Response of `POST /api/v1/auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct BasicTokenResponse {
    pub token: String,
    #[serde(default)]
    pub expires: Option<String>,
}

/// One page of a Jamf Pro API collection search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<NamedObject>,
}

/// Minimal view of a search hit; ids arrive as strings or numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedObject {
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
}

impl NamedObject {
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            serde_json::Value::String(id) => Some(id.clone()),
            serde_json::Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// Error body returned by the Jamf Pro API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiErrorCause>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorCause {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiErrorResponse {
    /// `code: description` pairs joined for logging, `None` when the body had no causes.
    pub fn message(&self) -> Option<String> {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|cause| {
                let code = cause.code.as_deref().unwrap_or("ERROR");
                match (&cause.field, &cause.description) {
                    (Some(field), Some(description)) => {
                        format!("{} ({}): {}", code, field, description)
                    }
                    (None, Some(description)) => format!("{}: {}", code, description),
                    _ => code.to_string(),
                }
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_results_with_string_and_numeric_ids() {
        let json = r#"{"totalCount":2,"results":[{"id":"7","name":"Engineers","count":3},{"id":8,"name":"Sales"}]}"#;
        let page: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].id_string().as_deref(), Some("7"));
        assert_eq!(page.results[1].id_string().as_deref(), Some("8"));
    }

    #[test]
    fn parse_error_response() {
        let json = r#"{"httpStatus":409,"errors":[{"code":"DUPLICATE_FIELD","field":"name","description":"name already exists","id":"0"}]}"#;
        let error: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            error.message().as_deref(),
            Some("DUPLICATE_FIELD (name): name already exists")
        );
    }

    #[test]
    fn error_response_without_causes_has_no_message() {
        let error: ApiErrorResponse = serde_json::from_str(r#"{"httpStatus":500}"#).unwrap();
        assert!(error.message().is_none());
    }
}
