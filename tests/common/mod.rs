// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::response::Response;
use netquota::config::Config;
use netquota::db::{CredentialStore, MemoryCredentialStore};
use netquota::models::Credential;
use netquota::routes::create_router;
use netquota::services::{Dashboard, QuotaClient, QuotaService, SessionStore};
use netquota::AppState;
use serde_json::{json, Value};
use std::sync::Arc;

/// `Authorization` value for `test_credential()`: base64("admin:secret").
#[allow(dead_code)]
pub const TEST_AUTH_HEADER: &str = "Basic YWRtaW46c2VjcmV0";

#[allow(dead_code)]
pub fn test_credential() -> Credential {
    Credential::new("admin", "secret")
}

/// One account record as the quota API returns it.
#[allow(dead_code)]
pub fn account_json(identifier: &str, account_type: &str, total: f64, used: f64) -> Value {
    json!({
        "identifier": identifier,
        "type": account_type,
        "name": format!("Line {}", identifier),
        "used_gb": used,
        "total_gb": total,
        "remain_gb": total - used,
        "expires_on": "2026-12-01 00:00:00",
        "offer_name": "Super Speed 1"
    })
}

/// Quota service against `base_url`, already logged in.
#[allow(dead_code)]
pub async fn logged_in_service(base_url: &str) -> QuotaService {
    let session = Arc::new(SessionStore::new(Arc::new(MemoryCredentialStore::new())));
    session
        .login(test_credential())
        .await
        .expect("memory store never fails");
    QuotaService::new(QuotaClient::new(base_url), session)
}

/// Dashboard against `base_url` with the given credential store.
#[allow(dead_code)]
pub fn test_dashboard(base_url: &str, store: Arc<dyn CredentialStore>) -> Dashboard {
    Dashboard::new(QuotaClient::new(base_url), store)
}

/// Create a test app talking to the quota API at `base_url`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        api_base_url: base_url.to_string(),
        ..Config::test_default()
    };
    let dashboard = test_dashboard(base_url, Arc::new(MemoryCredentialStore::new()));

    let state = Arc::new(AppState { config, dashboard });

    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("JSON body")
}
