// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard intents and UI state.
//!
//! Every user intent lands here. Intents never return errors: a failure is
//! reduced to its message and becomes the single current error, replacing
//! whatever was shown before. A 401 from the quota API additionally ends
//! the session and empties the collection before its message is shown.

use crate::db::CredentialStore;
use crate::error::AppError;
use crate::models::{Account, AccountDraft, Credential};
use crate::services::accounts::AccountCollection;
use crate::services::quota_api::{QuotaClient, QuotaService};
use crate::services::session::{SessionState, SessionStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Point-in-time copy of everything the view renders.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub session: SessionState,
    pub username: Option<String>,
    /// Some non-forced refresh, add or delete is in flight.
    pub loading: bool,
    /// Some forced refresh is in flight.
    pub refreshing: bool,
    pub error: Option<String>,
    pub add_form_open: bool,
    /// Account awaiting delete confirmation.
    pub delete_target: Option<String>,
    pub accounts: Vec<Account>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy)]
enum Activity {
    Loading,
    Refreshing,
}

#[derive(Default)]
struct UiState {
    loading: usize,
    refreshing: usize,
    error: Option<String>,
    add_form_open: bool,
    delete_target: Option<String>,
}

/// Session, account collection and UI flags behind one set of intents.
pub struct Dashboard {
    session: Arc<SessionStore>,
    api: QuotaService,
    accounts: AccountCollection,
    ui: Mutex<UiState>,
}

impl Dashboard {
    pub fn new(client: QuotaClient, store: Arc<dyn CredentialStore>) -> Self {
        let session = Arc::new(SessionStore::new(store));
        Self {
            api: QuotaService::new(client, session.clone()),
            session,
            accounts: AccountCollection::new(),
            ui: Mutex::new(UiState::default()),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn accounts(&self) -> &AccountCollection {
        &self.accounts
    }

    /// Pick up a persisted session. The caller decides when to load accounts.
    pub async fn restore(&self) -> SessionState {
        self.session.restore().await
    }

    // ─── Session Intents ─────────────────────────────────────────

    /// Log in and load the account list.
    pub async fn login(&self, credential: Credential) {
        self.ui.lock().await.error = None;

        if let Err(e) = self.session.login(credential).await {
            self.fail(e).await;
            return;
        }

        self.refresh(false).await;
    }

    /// Log out; no accounts are kept across sessions.
    pub async fn logout(&self) {
        if let Err(e) = self.end_session().await {
            self.ui.lock().await.error = Some(e.to_string());
        }
    }

    // ─── Collection Intents ──────────────────────────────────────

    pub async fn refresh(&self, force: bool) {
        let activity = if force {
            Activity::Refreshing
        } else {
            Activity::Loading
        };

        self.begin(activity, true).await;
        let result = self.accounts.refresh(&self.api, force).await;
        self.end(activity).await;

        if let Err(e) = result {
            self.fail(e).await;
        }
    }

    pub async fn open_add_form(&self) {
        self.ui.lock().await.add_form_open = true;
    }

    pub async fn close_add_form(&self) {
        self.ui.lock().await.add_form_open = false;
    }

    /// Create an account. The add form closes once the account exists, even
    /// if the follow-up refresh fails.
    pub async fn add(&self, draft: AccountDraft) {
        self.begin(Activity::Loading, true).await;
        let result = self.accounts.add(&self.api, &draft).await;

        let error = match result {
            Ok(_) => {
                self.ui.lock().await.add_form_open = false;
                None
            }
            Err(e) => {
                if e.account_created() {
                    self.ui.lock().await.add_form_open = false;
                }
                Some(e.into_inner())
            }
        };
        self.end(Activity::Loading).await;

        if let Some(e) = error {
            self.fail(e).await;
        }
    }

    /// Ask for confirmation before deleting `identifier`.
    pub async fn prompt_delete(&self, identifier: String) {
        let mut ui = self.ui.lock().await;
        ui.error = None;
        ui.delete_target = Some(identifier);
    }

    pub async fn cancel_delete(&self) {
        self.ui.lock().await.delete_target = None;
    }

    /// Delete the account awaiting confirmation, if any.
    pub async fn confirm_delete(&self) {
        let target = self.ui.lock().await.delete_target.take();
        match target {
            Some(identifier) => self.remove(&identifier).await,
            None => tracing::debug!("Delete confirmed with no pending target"),
        }
    }

    /// Remove an account optimistically; it reappears if the delete fails.
    pub async fn remove(&self, identifier: &str) {
        self.begin(Activity::Loading, false).await;
        let result = self.accounts.remove(&self.api, identifier).await;
        self.end(Activity::Loading).await;

        if let Err(e) = result {
            self.fail(e).await;
        }
    }

    pub async fn dismiss_error(&self) {
        self.ui.lock().await.error = None;
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let session = self.session.state().await;
        let username = self.session.username().await;
        let accounts = self.accounts.snapshot().await;
        let last_refreshed_at = self.accounts.last_refreshed_at().await;
        let ui = self.ui.lock().await;

        DashboardSnapshot {
            session,
            username,
            loading: ui.loading > 0,
            refreshing: ui.refreshing > 0,
            error: ui.error.clone(),
            add_form_open: ui.add_form_open,
            delete_target: ui.delete_target.clone(),
            accounts,
            last_refreshed_at,
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────

    async fn begin(&self, activity: Activity, clear_error: bool) {
        let mut ui = self.ui.lock().await;
        match activity {
            Activity::Loading => ui.loading += 1,
            Activity::Refreshing => ui.refreshing += 1,
        }
        if clear_error {
            ui.error = None;
        }
    }

    async fn end(&self, activity: Activity) {
        let mut ui = self.ui.lock().await;
        match activity {
            Activity::Loading => ui.loading = ui.loading.saturating_sub(1),
            Activity::Refreshing => ui.refreshing = ui.refreshing.saturating_sub(1),
        }
    }

    /// Clear session, persisted credential, collection and open dialogs.
    async fn end_session(&self) -> Result<(), AppError> {
        let result = self.session.logout().await;
        self.accounts.clear().await;

        let mut ui = self.ui.lock().await;
        ui.add_form_open = false;
        ui.delete_target = None;

        result
    }

    /// Surface `err` as the current error, ending the session first on 401.
    async fn fail(&self, err: AppError) {
        if err.is_auth_error() {
            tracing::info!("Credentials rejected, forcing logout");
            if let Err(e) = self.end_session().await {
                tracing::warn!(error = %e, "Failed to clear persisted credential");
            }
        } else {
            tracing::warn!(error = %err, "Dashboard intent failed");
        }

        self.ui.lock().await.error = Some(err.to_string());
    }
}
