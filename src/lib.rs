// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! NetQuota: track internet quota balances of telecom accounts
//!
//! This crate serves a local dashboard API backed by a remote
//! quota-tracking service, authenticated with HTTP Basic credentials.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::Dashboard;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub dashboard: Dashboard,
}
