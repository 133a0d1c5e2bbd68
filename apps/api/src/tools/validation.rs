use axum::extract::{multipart::MultipartRejection, rejection::JsonRejection};
use axum::http::StatusCode;
use thiserror::Error;

/// Client-caused request problems. Raised before any completion call.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("no file uploaded under 'pdf'")]
    MissingFile,

    #[error("unsupported content type '{0}'")]
    NotPdf(String),

    #[error("upload exceeds {limit} bytes")]
    FileTooLarge { limit: usize },

    #[error("request body too large: {0}")]
    BodyTooLarge(String),

    #[error("unreadable pdf: {0}")]
    UnreadablePdf(String),

    #[error("summary type and length are required")]
    MissingSummaryOptions,

    #[error("invalid record id '{0}'")]
    InvalidId(String),
}

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ValidationError::BodyTooLarge(rejection.body_text())
        } else {
            ValidationError::MalformedBody(rejection.body_text())
        }
    }
}

impl From<MultipartRejection> for ValidationError {
    fn from(rejection: MultipartRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text())
    }
}

/// A required form field: present and not blank.
pub fn require(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// An optional form field: blank counts as absent.
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts `application/pdf` and the legacy `application/x-pdf`, ignoring parameters.
pub fn is_pdf_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    matches!(essence.as_str(), "application/pdf" | "application/x-pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_missing_and_blank() {
        assert!(matches!(
            require("name", None),
            Err(ValidationError::MissingField("name"))
        ));
        assert!(matches!(
            require("name", Some(" \n\t".to_string())),
            Err(ValidationError::MissingField("name"))
        ));
        assert_eq!(require("name", Some("سارة".to_string())).unwrap(), "سارة");
    }

    #[test]
    fn test_optional_drops_blank_values() {
        assert_eq!(optional(Some("".to_string())), None);
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some("react".to_string())), Some("react".to_string()));
    }

    #[test]
    fn test_pdf_content_types() {
        assert!(is_pdf_content_type("application/pdf"));
        assert!(is_pdf_content_type("Application/PDF; charset=binary"));
        assert!(is_pdf_content_type("application/x-pdf"));
        assert!(!is_pdf_content_type("text/plain"));
        assert!(!is_pdf_content_type("application/octet-stream"));
        assert!(!is_pdf_content_type(""));
    }
}
