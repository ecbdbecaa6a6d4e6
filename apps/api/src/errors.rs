use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::search::SearchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant halts the current pipeline run; the message is shown to the user as-is.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read the document: {0}")]
    DocumentParse(String),

    #[error("The document contains no extractable text")]
    NoText,

    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("Job search error: {0}")]
    Search(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(kind) => AppError::UnsupportedFormat(kind),
            ExtractionError::NoText => AppError::NoText,
            other => AppError::DocumentParse(other.to_string()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Summarizer(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::Search(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("Rejected oversized upload: {msg}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "FILE_TOO_LARGE",
                    "The uploaded file is too large.".to_string(),
                )
            }
            AppError::UnsupportedFormat(kind) => {
                tracing::warn!("Rejected upload with unsupported format: {kind}");
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "UNSUPPORTED_FORMAT",
                    format!("Unsupported file format ({kind}). Upload a PDF or DOCX résumé."),
                )
            }
            AppError::DocumentParse(msg) => {
                tracing::warn!("Document parse failure: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_PARSE_ERROR",
                    self.to_string(),
                )
            }
            AppError::NoText => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_TEXT",
                self.to_string(),
            ),
            AppError::Summarizer(msg) => {
                tracing::error!("Summarizer error: {msg}");
                (StatusCode::BAD_GATEWAY, "SUMMARIZER_ERROR", msg.clone())
            }
            AppError::Search(msg) => {
                tracing::error!("Job search error: {msg}");
                (StatusCode::BAD_GATEWAY, "SEARCH_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
