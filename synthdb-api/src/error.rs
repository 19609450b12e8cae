//! Error types for the synthdb API
//!
//! Every failure that reaches a client is rendered with the uniform
//! `{message, errors}` body. Unexpected errors are logged server-side and
//! collapse to a generic 500 body that never leaks internals.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid input (400) - carries every violation, not just the first
    #[error("Bad request: {0:?}")]
    Validation(Vec<String>),

    /// Missing entity or rejected workflow step (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate record (409) - e.g., key already issued for this email
    #[error("{0}")]
    Conflict(String),

    /// Database failure (500)
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// synthdb-common error (500 unless it carries a specific variant)
    #[error(transparent)]
    Common(#[from] synthdb_common::Error),

    /// Generic error (500)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Bad request",
                    "errors": errors,
                })),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "data": null,
                    "message": message,
                    "errors": ["Not found"],
                })),
            )
                .into_response(),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(json!({
                    "message": message,
                    "errors": ["record already exists"],
                })),
            )
                .into_response(),
            ApiError::Database(ref err) => internal_error(&format!("database failure: {err}")),
            ApiError::Common(ref err) => internal_error(&err.to_string()),
            ApiError::Other(ref err) => internal_error(&format!("{err:#}")),
        }
    }
}

/// Generic 500 body; the actual cause only goes to the log
fn internal_error(detail: &str) -> Response {
    tracing::error!("Internal server error: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": "Oopsy, server error!",
            "errors": ["Internal server error"],
        })),
    )
        .into_response()
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
