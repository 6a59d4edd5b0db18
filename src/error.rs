// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! The `Display` text of each variant is the message shown on the
//! dashboard, so remote failures carry a human-readable message rather
//! than the raw status and body (those are logged instead).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// No credential is set.
    #[error("Authentication required")]
    NotAuthenticated,

    /// The quota API rejected the credential (HTTP 401).
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Network failure, or a non-401 error on a read or delete.
    #[error("{0}")]
    Transport(String),

    /// The account draft was rejected locally or by the quota API.
    #[error("{0}")]
    Validation(String),

    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub const FETCH_FAILED: &'static str = "Failed to fetch data";
    pub const ADD_FAILED: &'static str = "Failed to add account. Check credentials or identifier.";
    pub const DELETE_FAILED: &'static str = "Failed to delete account";
    pub const DRAFT_INCOMPLETE: &'static str = "Identifier and password are required";

    /// True for errors that must end the session.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::InvalidCredentials)
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
            AppError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }
            AppError::Transport(msg) => {
                (StatusCode::BAD_GATEWAY, "upstream_error", Some(msg.clone()))
            }
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                Some(msg.clone()),
            ),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Credential storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
