//! Error types for the HAMS dashboard client

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The server answered 401; the stored session has been cleared.
    #[error("Session expired: {0}")]
    Unauthorized(String),

    #[error("Request rejected ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Refused locally by the permission gate, nothing was sent.
    #[error("Not permitted: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Text for an error toast. Server rejections show the backend `detail` verbatim.
    pub fn toast_message(&self) -> String {
        match self {
            AppError::Unauthorized(detail) | AppError::Api { detail, .. } => detail.clone(),
            AppError::Validation(msg) | AppError::Forbidden(msg) => msg.clone(),
            AppError::Network(e) if e.is_timeout() => "Request timed out".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a server rejection, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized(_) => Some(401),
            AppError::Api { status, .. } => Some(*status),
            AppError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(format_validation_errors(&errors))
    }
}

/// Flatten field errors into one line, ordered by field name.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    if messages.is_empty() {
        "Invalid form data".to_string()
    } else {
        messages.join("; ")
    }
}

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub detail: Option<Value>,
}

impl ErrorResponse {
    /// Extract a displayable `detail` from a raw response body.
    ///
    /// `detail` is either a plain string or a list of `{loc, msg}` entries
    /// for request validation failures.
    pub fn detail_from_body(body: &str) -> Option<String> {
        let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            Value::String(detail) => Some(detail),
            Value::Array(entries) => {
                let messages: Vec<String> = entries
                    .iter()
                    .filter_map(|entry| {
                        let msg = entry.get("msg")?.as_str()?;
                        let field = entry
                            .get("loc")
                            .and_then(Value::as_array)
                            .and_then(|loc| loc.iter().rev().find_map(Value::as_str));
                        Some(match field {
                            Some(field) => format!("{}: {}", field, msg),
                            None => msg.to_string(),
                        })
                    })
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let body = r#"{"detail": "Animal Simba is already checked out"}"#;
        assert_eq!(
            ErrorResponse::detail_from_body(body).as_deref(),
            Some("Animal Simba is already checked out")
        );
    }

    #[test]
    fn test_detail_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "animal_ids", 0], "msg": "value is not a valid integer"},
            {"loc": ["query", "zoo_id"], "msg": "field required"}
        ]}"#;
        assert_eq!(
            ErrorResponse::detail_from_body(body).as_deref(),
            Some("animal_ids: value is not a valid integer; zoo_id: field required")
        );
    }

    #[test]
    fn test_detail_missing_or_not_json() {
        assert!(ErrorResponse::detail_from_body(r#"{"message": "ok"}"#).is_none());
        assert!(ErrorResponse::detail_from_body("Internal Server Error").is_none());
        assert!(ErrorResponse::detail_from_body(r#"{"detail": null}"#).is_none());
    }

    #[test]
    fn test_toast_message_uses_detail() {
        let err = AppError::Api {
            status: 400,
            detail: "Event is already ended".to_string(),
        };
        assert_eq!(err.toast_message(), "Event is already ended");
        assert_eq!(err.status(), Some(400));

        let err = AppError::Unauthorized("Could not validate credentials".to_string());
        assert_eq!(err.toast_message(), "Could not validate credentials");
        assert_eq!(err.status(), Some(401));
    }
}
