// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory account collection.
//!
//! The collection is replaced wholesale by every applied refresh and is
//! patched locally only by optimistic removal. Overlapping refreshes are
//! sequenced by ticket: a response is applied only if no later-issued
//! refresh (or `clear`) has already landed, so a slow early response can
//! never overwrite a newer one.

use crate::error::AppError;
use crate::models::{Account, AccountDraft};
use crate::services::quota_api::QuotaService;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

/// Result of a successful list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection now holds `count` accounts from this response.
    Applied { count: usize },
    /// A newer refresh or a clear landed first; this response was dropped.
    Stale,
}

/// Failure of `AccountCollection::add`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddError {
    /// The account was not created.
    #[error(transparent)]
    Create(AppError),
    /// The account was created but the follow-up refresh failed.
    #[error(transparent)]
    Refresh(AppError),
}

impl AddError {
    pub fn account_created(&self) -> bool {
        matches!(self, AddError::Refresh(_))
    }

    pub fn into_inner(self) -> AppError {
        match self {
            AddError::Create(e) | AddError::Refresh(e) => e,
        }
    }
}

#[derive(Default)]
struct CollectionState {
    accounts: Vec<Account>,
    /// Last ticket handed out to a refresh.
    issued: u64,
    /// Responses with a ticket at or below this are stale.
    floor: u64,
    /// Bumped whenever `accounts` is replaced wholesale.
    replacements: u64,
    last_refreshed_at: Option<DateTime<Utc>>,
}

/// Ordered list of tracked accounts, in server order.
#[derive(Default)]
pub struct AccountCollection {
    state: Mutex<CollectionState>,
}

impl AccountCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Vec<Account> {
        self.state.lock().await.accounts.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.last_refreshed_at
    }

    /// Empty the collection and drop any refresh still in flight.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.accounts.clear();
        state.floor = state.issued;
        state.replacements += 1;
        state.last_refreshed_at = None;
    }

    /// Fetch the account list and replace the collection with it.
    ///
    /// On failure the collection is left untouched. A refresh overtaken by
    /// a newer applied refresh or a `clear` returns `Stale`, whether its
    /// request succeeded or not.
    pub async fn refresh(
        &self,
        api: &QuotaService,
        force: bool,
    ) -> Result<RefreshOutcome, AppError> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.issued += 1;
            state.issued
        };

        let result = api.list_accounts(force).await;

        // A superseded refresh reports nothing, not even its failure
        let mut state = self.state.lock().await;
        if ticket <= state.floor {
            tracing::debug!(
                ticket,
                floor = state.floor,
                failed = result.is_err(),
                "Discarding stale refresh response"
            );
            return Ok(RefreshOutcome::Stale);
        }
        let accounts = result?;

        let count = accounts.len();
        state.floor = ticket;
        state.accounts = accounts;
        state.replacements += 1;
        state.last_refreshed_at = Some(Utc::now());

        tracing::debug!(count, force, "Account collection refreshed");
        Ok(RefreshOutcome::Applied { count })
    }

    /// Create an account, then re-fetch the list.
    ///
    /// The server computes the new account's quota fields, so the refresh is
    /// required to show it.
    pub async fn add(
        &self,
        api: &QuotaService,
        draft: &AccountDraft,
    ) -> Result<RefreshOutcome, AddError> {
        api.create_account(draft).await.map_err(AddError::Create)?;
        self.refresh(api, false).await.map_err(AddError::Refresh)
    }

    /// Optimistically remove `identifier`, then delete it remotely.
    ///
    /// If the delete fails, the removed record is put back in front of the
    /// first record that originally followed it and is still listed, so
    /// removals that completed in the meantime stay removed. Nothing is put
    /// back if a refresh or clear replaced the collection while the delete
    /// was in flight.
    pub async fn remove(&self, api: &QuotaService, identifier: &str) -> Result<(), AppError> {
        let (removed, followers, replacements) = {
            let mut state = self.state.lock().await;
            let followers: Vec<String> = state
                .accounts
                .iter()
                .position(|a| a.identifier == identifier)
                .map(|first| {
                    state.accounts[first + 1..]
                        .iter()
                        .filter(|a| a.identifier != identifier)
                        .map(|a| a.identifier.clone())
                        .collect()
                })
                .unwrap_or_default();
            let (removed, kept): (Vec<Account>, Vec<Account>) = std::mem::take(&mut state.accounts)
                .into_iter()
                .partition(|a| a.identifier == identifier);
            state.accounts = kept;
            (removed, followers, state.replacements)
        };

        if let Err(e) = api.delete_account(identifier).await {
            let mut state = self.state.lock().await;
            if state.replacements == replacements {
                let at = state
                    .accounts
                    .iter()
                    .position(|a| followers.contains(&a.identifier))
                    .unwrap_or(state.accounts.len());
                state.accounts.splice(at..at, removed);
                tracing::debug!(identifier, "Rolled back optimistic removal");
            } else {
                tracing::debug!(identifier, "Collection replaced during delete, skipping rollback");
            }
            return Err(e);
        }

        Ok(())
    }
}
