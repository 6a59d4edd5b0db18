// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gate for intents that need a logged-in dashboard.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that rejects the request unless a credential is set.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.dashboard.session().is_authenticated().await {
        tracing::debug!(path = %request.uri().path(), "Rejected intent without a session");
        return Err(AppError::NotAuthenticated);
    }

    Ok(next.run(request).await)
}
