//! Custom error types for the admin API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the admin API
///
/// Every variant maps to a status code and a JSON `{"message": ...}` body at
/// the handler boundary. Nothing here is retried and nothing is fatal to the
/// process; each request fails independently.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Login failure; deliberately identical for unknown email and wrong
    /// password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired, or forged bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Referenced record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique field already taken
    #[error("{0}")]
    AlreadyExists(String),

    /// Image hosting failure
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Anything else; the detail is only surfaced in development mode
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Wrap an arbitrary failure as an internal error
    pub fn internal(err: impl ToString) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

fn development_mode() -> bool {
    std::env::var("APP_ENV").is_ok_and(|v| v == "development")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upload(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            ApiError::Internal(detail) if development_mode() => json!({
                "message": "Internal server error",
                "error": detail,
            }),
            ApiError::Internal(_) | ApiError::Database(_) => json!({
                "message": "Internal server error",
            }),
            other => json!({
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
