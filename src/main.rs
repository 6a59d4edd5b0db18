// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! NetQuota dashboard server
//!
//! Serves the dashboard intent API on a local port and talks to the remote
//! quota API on the user's behalf.

use anyhow::Context;
use netquota::{
    config::Config,
    db::FileCredentialStore,
    services::{Dashboard, QuotaClient, SessionState},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        api = %config.api_base_url,
        "Starting NetQuota dashboard"
    );

    let store = Arc::new(FileCredentialStore::new(&config.credential_path));
    tracing::info!(path = %store.path().display(), "Using credential file");

    let dashboard = Dashboard::new(QuotaClient::new(config.api_base_url.clone()), store);
    let restored = dashboard.restore().await;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        dashboard,
    });

    // A restored session loads its accounts in the background
    if restored == SessionState::Authenticated {
        let state = state.clone();
        tokio::spawn(async move {
            state.dashboard.refresh(false).await;
        });
    }

    // Build router
    let app = netquota::routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("netquota=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
