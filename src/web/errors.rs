use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::db::DbError;

/// Body entry returned for every rejected menu entry, whatever the cause.
pub const GENERIC_VALIDATION_ERROR: &str = "validation errors";

/// Application error type for web handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(Vec<String>),
    Internal(String),
}

impl AppError {
    /// The single, undifferentiated validation failure clients see.
    pub fn validation_errors() -> Self {
        AppError::Validation(vec![GENERIC_VALIDATION_ERROR.to_string()])
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => AppError::NotFound(msg),
            DbError::Validation(_) => AppError::validation_errors(),
            e if e.is_constraint_violation() => AppError::validation_errors(),
            e => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": msg })),
                )
                    .into_response()
            }
        }
    }
}
