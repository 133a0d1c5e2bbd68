use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::locale::{Locale, Message};
use crate::models::RecordKind;
use crate::storage::StoreError;
use crate::tools::validation::ValidationError;

/// Application-level error type returned by every handler.
///
/// Converted into the `{success: false, error}` envelope by `ApiError`, which
/// pairs it with the request locale. Provider and storage details are logged
/// here and never reach the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("LLM error ({}): {source}", .kind.as_str())]
    Generation { kind: RecordKind, source: LlmError },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn generation(kind: RecordKind) -> impl FnOnce(LlmError) -> AppError {
        move |source| AppError::Generation { kind, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(
                ValidationError::FileTooLarge { .. } | ValidationError::BodyTooLarge(_),
            ) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Generation { .. } | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> Message {
        match self {
            AppError::Validation(e) => match e {
                ValidationError::MalformedBody(_) => Message::MalformedBody,
                ValidationError::MissingField(field) => Message::MissingField(field.to_string()),
                ValidationError::MissingFile => Message::MissingFile,
                ValidationError::NotPdf(_) => Message::NotPdf,
                ValidationError::FileTooLarge { .. } => Message::FileTooLarge,
                ValidationError::BodyTooLarge(_) => Message::BodyTooLarge,
                ValidationError::UnreadablePdf(_) => Message::UnreadablePdf,
                ValidationError::MissingSummaryOptions => Message::MissingSummaryOptions,
                ValidationError::InvalidId(_) => Message::InvalidId,
            },
            AppError::NotFound(_) => Message::NotFound,
            AppError::Generation { kind, .. } => Message::GenerationFailed(*kind),
            AppError::Storage(_) => Message::StorageFailed,
            AppError::Internal(_) => Message::Internal,
        }
    }

    pub fn localized(self, locale: Locale) -> ApiError {
        ApiError {
            locale,
            error: self,
        }
    }
}

/// An `AppError` ready to be rendered in the request's locale.
#[derive(Debug)]
pub struct ApiError {
    pub locale: Locale,
    pub error: AppError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();

        match &self.error {
            AppError::Generation { kind, source } => {
                tracing::error!(tool = kind.as_str(), "LLM error: {source}");
            }
            AppError::Storage(e) => tracing::error!("Storage error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            AppError::Validation(e) => tracing::debug!("Rejected request: {e}"),
            AppError::NotFound(what) => tracing::debug!("Not found: {what}"),
        }

        let body = Json(json!({
            "success": false,
            "error": self.error.message().render(self.locale),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn render(error: AppError, locale: Locale) -> (StatusCode, Value) {
        let response = error.localized(locale).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request_envelope() {
        let (status, body) = render(
            ValidationError::MissingField("subject").into(),
            Locale::En,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "The field 'subject' is required.");
    }

    #[tokio::test]
    async fn test_oversized_upload_is_payload_too_large() {
        let (status, body) = render(
            ValidationError::FileTooLarge { limit: 10 }.into(),
            Locale::Ar,
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_generation_error_hides_provider_detail() {
        let error = AppError::Generation {
            kind: RecordKind::Resume,
            source: LlmError::Api {
                status: 401,
                message: "invalid api key sk-secret".to_string(),
            },
        };
        let (status, body) = render(error, Locale::En).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Failed to generate resume"));
        assert!(!message.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_storage_error_is_server_error() {
        let (status, body) = render(StoreError::Poisoned.into(), Locale::En).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "The result could not be saved. Please try again."
        );
    }

    #[tokio::test]
    async fn test_payload_encoding_failure_is_storage_error() {
        let cause = serde_json::from_str::<Value>("{").unwrap_err();
        let (status, body) = render(StoreError::from(cause).into(), Locale::En).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "The result could not be saved. Please try again."
        );
    }

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        let (status, body) = render(
            ValidationError::BodyTooLarge("length limit exceeded".to_string()).into(),
            Locale::En,
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body["error"],
            "The request is too large. Please shorten your text."
        );
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(
            AppError::NotFound("email 9".to_string()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
