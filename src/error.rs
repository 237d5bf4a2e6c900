// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The authorization endpoint was unreachable or rejected the refresh.
    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    /// A calendar call failed for a room.
    #[error("Calendar API error during {operation} for room {room_id}: {message}")]
    RemoteApi {
        room_id: String,
        operation: &'static str,
        message: String,
    },

    #[error("No stored credentials; run with EVENTBOARD_* bootstrap variables set")]
    CredentialsMissing,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a raw outbound-call failure with the room and operation it belongs to.
    pub fn remote(room_id: &str, operation: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::RemoteApi {
            room_id: room_id.to_string(),
            operation,
            message: err.to_string(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::TokenRefresh(msg) => {
                tracing::error!(error = %msg, "Token refresh failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "token_refresh_failed",
                    None,
                )
            }
            AppError::RemoteApi {
                room_id,
                operation,
                message,
            } => {
                tracing::error!(room_id = %room_id, operation, error = %message, "Calendar API error");
                (
                    StatusCode::BAD_GATEWAY,
                    "remote_api_error",
                    Some(format!("{} failed for room {}", operation, room_id)),
                )
            }
            AppError::CredentialsMissing => {
                tracing::error!("Credential row missing");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "credentials_missing",
                    None,
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
