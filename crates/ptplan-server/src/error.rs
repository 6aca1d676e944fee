use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use ptplan_core::error::CoreError;
use ptplan_engine::error::EngineError;
use ptplan_export::error::ExportError;
use ptplan_storage::error::StorageError;

/// Shown to the user whenever the model call fails after a valid request.
pub const GENERATION_FAILED: &str = "could not generate exercises, try again";

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::PatientNotFound(_) | CoreError::IndexOutOfRange { .. } => {
                ApiError::NotFound(e.to_string())
            }
            CoreError::PatientExists(_) => ApiError::Conflict(e.to_string()),
            CoreError::InvalidField { .. } | CoreError::InvalidDay(_) => {
                ApiError::BadRequest(e.to_string())
            }
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            EngineError::MalformedJson {
                reason,
                raw_content,
            } => {
                tracing::warn!(%reason, %raw_content, "exercise generation failed");
                ApiError::Upstream(GENERATION_FAILED.to_string())
            }
            other => {
                tracing::warn!(error = %other, "exercise generation failed");
                ApiError::Upstream(GENERATION_FAILED.to_string())
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
