// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: the current credential and its persisted copy.

use crate::db::CredentialStore;
use crate::error::AppError;
use crate::models::Credential;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Whether a credential is currently set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Holds the current credential and mirrors it into a `CredentialStore`.
///
/// The session only leaves `Authenticated` through `logout`, either
/// explicit or forced by a 401 from the quota API.
pub struct SessionStore {
    current: RwLock<Option<Credential>>,
    store: Arc<dyn CredentialStore>,
}

impl SessionStore {
    /// Create an unauthenticated session backed by `store`.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            current: RwLock::new(None),
            store,
        }
    }

    /// Adopt a previously persisted credential, if any.
    ///
    /// The credential is not checked against the server; a stale one shows
    /// up as a 401 on the first API call.
    pub async fn restore(&self) -> SessionState {
        match self.store.load() {
            Ok(Some(credential)) => {
                tracing::info!(username = %credential.username, "Session restored");
                *self.current.write().await = Some(credential);
                SessionState::Authenticated
            }
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted credential, starting logged out");
                SessionState::Unauthenticated
            }
        }
    }

    /// Persist `credential` and make it current.
    ///
    /// If persisting fails the session is left as it was.
    pub async fn login(&self, credential: Credential) -> Result<(), AppError> {
        self.store.save(&credential)?;
        tracing::info!(username = %credential.username, "Logged in");
        *self.current.write().await = Some(credential);
        Ok(())
    }

    /// Drop the current credential and its persisted copy.
    ///
    /// The in-memory session is always cleared, even when removing the
    /// persisted copy fails.
    pub async fn logout(&self) -> Result<(), AppError> {
        let previous = self.current.write().await.take();
        if let Some(credential) = previous {
            tracing::info!(username = %credential.username, "Logged out");
        }
        self.store.clear()
    }

    pub async fn state(&self) -> SessionState {
        if self.current.read().await.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state().await == SessionState::Authenticated
    }

    pub async fn current(&self) -> Option<Credential> {
        self.current.read().await.clone()
    }

    pub async fn username(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|c| c.username.clone())
    }

    /// The current credential, or `NotAuthenticated`.
    pub async fn require(&self) -> Result<Credential, AppError> {
        self.current().await.ok_or(AppError::NotAuthenticated)
    }
}
