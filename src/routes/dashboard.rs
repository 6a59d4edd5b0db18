// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard view: grouped account cards, flags and the current error.

use crate::models::{Account, AccountGroup, AccountGroups, ProgressFill};
use crate::services::{DashboardSnapshot, SessionState};
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Dashboard view routes (no session required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/error", delete(dismiss_error))
}

/// Everything the front end needs to draw the current screen.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub session: SessionState,
    pub username: Option<String>,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
    pub add_form_open: bool,
    pub delete_prompt: Option<DeletePrompt>,
    pub account_count: usize,
    /// Logged in, idle, no error and nothing tracked yet.
    pub empty: bool,
    pub last_refreshed_at: Option<String>,
    pub groups: Vec<AccountGroupView>,
}

/// Confirmation dialog for a pending delete.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct DeletePrompt {
    pub identifier: String,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct AccountGroupView {
    pub key: AccountGroup,
    pub title: String,
    pub count: usize,
    pub accounts: Vec<AccountCard>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct AccountCard {
    pub identifier: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub remain_gb: f64,
    pub used_gb: f64,
    pub total_gb: f64,
    pub percent_left: f64,
    pub low: bool,
    pub progress: ProgressFill,
    pub expires: String,
    pub offer_name: Option<String>,
}

impl From<&Account> for AccountCard {
    fn from(account: &Account) -> Self {
        Self {
            identifier: account.identifier.clone(),
            name: account.display_name().to_string(),
            account_type: account.account_type.to_string(),
            remain_gb: account.remain_gb,
            used_gb: account.used_gb,
            total_gb: account.total_gb,
            percent_left: account.percent_left(),
            low: account.is_low(),
            progress: account.progress(),
            expires: account.expiry_date().unwrap_or("N/A").to_string(),
            offer_name: account.offer_name.clone(),
        }
    }
}

impl From<DashboardSnapshot> for DashboardResponse {
    fn from(snapshot: DashboardSnapshot) -> Self {
        let groups = {
            let grouped = AccountGroups::from_accounts(&snapshot.accounts);
            AccountGroup::ALL
                .iter()
                .map(|&group| {
                    let accounts: Vec<AccountCard> = grouped
                        .get(group)
                        .iter()
                        .map(|&account| AccountCard::from(account))
                        .collect();
                    AccountGroupView {
                        key: group,
                        title: group.title().to_string(),
                        count: accounts.len(),
                        accounts,
                    }
                })
                .collect()
        };

        let delete_prompt = snapshot.delete_target.map(|identifier| DeletePrompt {
            title: "Remove Connection?".to_string(),
            message: format!(
                "Are you sure you want to delete {}? This action cannot be undone.",
                identifier
            ),
            identifier,
        });

        let empty = snapshot.session == SessionState::Authenticated
            && !snapshot.loading
            && snapshot.accounts.is_empty()
            && snapshot.error.is_none();

        Self {
            session: snapshot.session,
            username: snapshot.username,
            loading: snapshot.loading,
            refreshing: snapshot.refreshing,
            error: snapshot.error,
            add_form_open: snapshot.add_form_open,
            delete_prompt,
            account_count: snapshot.accounts.len(),
            empty,
            last_refreshed_at: snapshot.last_refreshed_at.map(|t| t.to_rfc3339()),
            groups,
        }
    }
}

/// Render the dashboard as it stands after the last intent.
pub(crate) async fn render(state: &AppState) -> Json<DashboardResponse> {
    Json(state.dashboard.snapshot().await.into())
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    render(&state).await
}

async fn dismiss_error(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    state.dashboard.dismiss_error().await;
    render(&state).await
}
