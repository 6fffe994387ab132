//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::db::DatabaseError;
use crate::pipeline::InsightError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("No active profile")]
    NoActiveProfile,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("A save is already in flight")]
    SaveInFlight,
    #[error("Insight sections are not resolved yet")]
    NotReadyToSave,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::NoActiveProfile => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NO_PROFILE",
                "Complete the intake wizard before using this endpoint".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::SaveInFlight => (
                StatusCode::CONFLICT,
                "SAVE_IN_FLIGHT",
                "A save for this record is already in flight".to_string(),
            ),
            ApiError::NotReadyToSave => (
                StatusCode::CONFLICT,
                "NOT_READY",
                "Wait for guidance, medicines and remedies to resolve".to_string(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoActiveProfile => ApiError::NoActiveProfile,
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            CoreError::Database(e) => e.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{entity_type} {id} not found"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<InsightError> for ApiError {
    fn from(err: InsightError) -> Self {
        match err {
            InsightError::InvalidMeasurement(_) | InsightError::EmptyQuery => {
                ApiError::BadRequest(err.to_string())
            }
            InsightError::SaveInFlight => ApiError::SaveInFlight,
            InsightError::NotReadyToSave => ApiError::NotReadyToSave,
            InsightError::NoProfile => ApiError::NoActiveProfile,
            InsightError::Database(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
