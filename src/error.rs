// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! The generation endpoint deliberately keeps its failure surface narrow:
//! business outcomes (limit reached, fallback-served) travel in a 200 body,
//! and downstream faults (provider, database) are absorbed by the admission
//! service with a degrade policy. Only malformed input becomes a non-200
//! response, carrying the documented `{error, usage}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::UsageSnapshot;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error body for the generation API: the documented 400 shape carries a
/// denied usage snapshot so clients always have a usage object to render.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    usage: UsageSnapshot,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            // Provider faults are consumed by the admission service's
            // fallback path; this arm exists for completeness.
            AppError::Provider(msg) => {
                tracing::error!(error = %msg, "Provider error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error,
            usage: UsageSnapshot::denied(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
