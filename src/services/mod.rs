// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod dashboard;
pub mod quota_api;
pub mod session;

pub use accounts::{AccountCollection, AddError, RefreshOutcome};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use quota_api::{QuotaClient, QuotaService};
pub use session::{SessionState, SessionStore};
