// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and logout intents.

use crate::models::Credential;
use crate::routes::dashboard::{render, DashboardResponse};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/session", post(login).delete(logout))
}

/// Login form body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Log in, persist the credential and load accounts.
///
/// Credentials are not checked up front: a bad pair shows up as an
/// "Invalid Credentials" error from the initial account load.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Json<DashboardResponse> {
    state
        .dashboard
        .login(Credential::new(body.username, body.password))
        .await;
    render(&state).await
}

async fn logout(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    state.dashboard.logout().await;
    render(&state).await
}
