// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quota API client.
//!
//! Handles:
//! - Listing tracked accounts (optionally bypassing the server's cache)
//! - Creating and deleting tracked accounts
//! - Mapping HTTP status to `AppError` (401 ends the session)

use crate::error::AppError;
use crate::models::{Account, AccountDraft, Credential};
use crate::services::session::SessionStore;
use reqwest::{header, StatusCode};
use std::sync::Arc;
use validator::Validate;

/// Raw quota API client. The credential is passed on every call.
#[derive(Clone)]
pub struct QuotaClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuotaClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// List all tracked accounts.
    ///
    /// `force_refresh` asks the server to bypass its own quota cache.
    pub async fn list_accounts(
        &self,
        credential: &Credential,
        force_refresh: bool,
    ) -> Result<Vec<Account>, AppError> {
        let url = format!("{}/quotas", self.base_url);

        let mut request = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, credential.basic_auth_value());
        if force_refresh {
            request = request.query(&[("force_refresh", "true")]);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Quota list request failed");
            AppError::Transport(AppError::FETCH_FAILED.to_string())
        })?;

        let response = check_response(response, "list", || {
            AppError::Transport(AppError::FETCH_FAILED.to_string())
        })
        .await?;

        response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to parse quota data: {}", e)))
    }

    /// Register a new account to track.
    pub async fn create_account(
        &self,
        credential: &Credential,
        draft: &AccountDraft,
    ) -> Result<(), AppError> {
        let url = format!("{}/accounts", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, credential.basic_auth_value())
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Create account request failed");
                AppError::Transport(AppError::ADD_FAILED.to_string())
            })?;

        check_response(response, "create", || {
            AppError::Validation(AppError::ADD_FAILED.to_string())
        })
        .await?;

        tracing::info!(identifier = %draft.identifier, "Account created");
        Ok(())
    }

    /// Stop tracking an account.
    pub async fn delete_account(
        &self,
        credential: &Credential,
        identifier: &str,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/accounts/{}",
            self.base_url,
            urlencoding::encode(identifier)
        );

        let response = self
            .http
            .delete(&url)
            .header(header::AUTHORIZATION, credential.basic_auth_value())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, identifier, "Delete account request failed");
                AppError::Transport(AppError::DELETE_FAILED.to_string())
            })?;

        check_response(response, "delete", || {
            AppError::Transport(AppError::DELETE_FAILED.to_string())
        })
        .await?;

        tracing::info!(identifier, "Account deleted");
        Ok(())
    }
}

/// Pass successful responses through; map 401 to `InvalidCredentials` and
/// anything else to the operation's own failure.
async fn check_response(
    response: reqwest::Response,
    operation: &'static str,
    failure: impl FnOnce() -> AppError,
) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(operation, "Quota API rejected credentials (401)");
        return Err(AppError::InvalidCredentials);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(operation, status = %status, body = %body, "Quota API request failed");
    Err(failure())
}

// ─────────────────────────────────────────────────────────────────────────────
// QuotaService - client bound to the current session
// ─────────────────────────────────────────────────────────────────────────────

/// Quota API calls made with whatever credential is current at call time.
///
/// The credential is read from the session on every call, so a login or
/// logout between two requests is always honored.
#[derive(Clone)]
pub struct QuotaService {
    client: QuotaClient,
    session: Arc<SessionStore>,
}

impl QuotaService {
    pub fn new(client: QuotaClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    pub async fn list_accounts(&self, force_refresh: bool) -> Result<Vec<Account>, AppError> {
        let credential = self.session.require().await?;
        self.client.list_accounts(&credential, force_refresh).await
    }

    /// Create an account. Only emptiness of identifier and password is
    /// checked here; the server validates everything else.
    pub async fn create_account(&self, draft: &AccountDraft) -> Result<(), AppError> {
        let credential = self.session.require().await?;
        draft
            .validate()
            .map_err(|_| AppError::Validation(AppError::DRAFT_INCOMPLETE.to_string()))?;
        self.client.create_account(&credential, draft).await
    }

    pub async fn delete_account(&self, identifier: &str) -> Result<(), AppError> {
        let credential = self.session.require().await?;
        self.client.delete_account(&credential, identifier).await
    }
}
