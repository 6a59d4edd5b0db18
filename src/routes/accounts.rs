// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account intents (session required).

use crate::models::AccountDraft;
use crate::routes::dashboard::{render, DashboardResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Account routes. The session gate is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quotas/refresh", post(refresh))
        .route("/api/add-form", post(open_add_form).delete(close_add_form))
        .route("/api/accounts", post(add_account))
        .route("/api/accounts/{identifier}", delete(remove_account))
        .route("/api/delete-prompt", post(prompt_delete).delete(cancel_delete))
        .route("/api/delete-prompt/confirm", post(confirm_delete))
}

// ─── Refresh ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    /// Ask the quota API to bypass its cache
    #[serde(default)]
    pub force: bool,
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RefreshParams>,
) -> Json<DashboardResponse> {
    state.dashboard.refresh(params.force).await;
    render(&state).await
}

// ─── Add ─────────────────────────────────────────────────────

async fn open_add_form(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    state.dashboard.open_add_form().await;
    render(&state).await
}

async fn close_add_form(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    state.dashboard.close_add_form().await;
    render(&state).await
}

async fn add_account(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AccountDraft>,
) -> Json<DashboardResponse> {
    state.dashboard.add(draft).await;
    render(&state).await
}

// ─── Delete ──────────────────────────────────────────────────

async fn remove_account(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Json<DashboardResponse> {
    state.dashboard.remove(&identifier).await;
    render(&state).await
}

#[derive(Debug, Deserialize)]
pub struct DeletePromptRequest {
    pub identifier: String,
}

async fn prompt_delete(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeletePromptRequest>,
) -> Json<DashboardResponse> {
    state.dashboard.prompt_delete(body.identifier).await;
    render(&state).await
}

async fn cancel_delete(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    state.dashboard.cancel_delete().await;
    render(&state).await
}

async fn confirm_delete(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    state.dashboard.confirm_delete().await;
    render(&state).await
}
