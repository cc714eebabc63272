use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Feature-extraction failures (quality model, degenerate vectors, bad page numbers) never
/// reach this type: they are recovered where they happen. Everything here is a rejection
/// the caller has to see.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Models unavailable: {0}")]
    ModelsUnavailable(String),

    #[error("No text could be extracted from '{0}'")]
    EmptyExtractedText(String),

    #[error("Expected {expected} documents, got {actual}")]
    WrongDocumentCount { expected: usize, actual: usize },

    #[error("No valid resumes in batch")]
    NoValidResumes,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, surfaced in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ModelsUnavailable(_) => "MODELS_UNAVAILABLE",
            AppError::EmptyExtractedText(_) => "EMPTY_EXTRACTED_TEXT",
            AppError::WrongDocumentCount { .. } => "WRONG_DOCUMENT_COUNT",
            AppError::NoValidResumes => "NO_VALID_RESUMES",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ModelsUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::EmptyExtractedText(_)
            | AppError::NoValidResumes
            | AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::WrongDocumentCount { .. } | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show an end user. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ModelsUnavailable(_) => {
                "Scoring models are not loaded yet. Train and install the model artifacts first."
                    .to_string()
            }
            AppError::EmptyExtractedText(filename) => format!(
                "No text could be extracted from '{filename}'. Scanned documents are not supported."
            ),
            AppError::WrongDocumentCount { expected, actual } => {
                format!("Upload exactly {expected} resumes to compare (got {actual}).")
            }
            AppError::NoValidResumes => {
                "None of the uploaded resumes contained extractable text.".to_string()
            }
            AppError::Validation(msg) | AppError::Extraction(msg) => msg.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ModelsUnavailable(reason) => {
                tracing::warn!("Rejected request, models unavailable: {reason}");
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
            }
            _ => {}
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.user_message()
            }
        }));

        (self.status(), body).into_response()
    }
}
