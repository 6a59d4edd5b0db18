// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store and credential persistence tests.

use netquota::db::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use netquota::error::AppError;
use netquota::models::Credential;
use netquota::services::{SessionState, SessionStore};
use std::sync::Arc;

mod common;

use common::test_credential;

// =============================================================================
// Session Store
// =============================================================================

#[tokio::test]
async fn test_new_session_is_unauthenticated() {
    let session = SessionStore::new(Arc::new(MemoryCredentialStore::new()));

    assert_eq!(session.state().await, SessionState::Unauthenticated);
    assert_eq!(session.require().await, Err(AppError::NotAuthenticated));
}

#[tokio::test]
async fn test_restore_adopts_persisted_credential() {
    let store = Arc::new(MemoryCredentialStore::with_credential(test_credential()));
    let session = SessionStore::new(store);

    assert_eq!(session.restore().await, SessionState::Authenticated);
    assert_eq!(session.current().await, Some(test_credential()));
    assert_eq!(session.username().await.as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_restore_without_persisted_credential() {
    let session = SessionStore::new(Arc::new(MemoryCredentialStore::new()));

    assert_eq!(session.restore().await, SessionState::Unauthenticated);
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn test_login_persists_and_logout_clears() {
    let store = Arc::new(MemoryCredentialStore::new());
    let session = SessionStore::new(store.clone());

    session.login(test_credential()).await.unwrap();
    assert!(session.is_authenticated().await);
    assert_eq!(store.load().unwrap(), Some(test_credential()));

    session.logout().await.unwrap();
    assert!(!session.is_authenticated().await);
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(session.require().await, Err(AppError::NotAuthenticated));
}

#[tokio::test]
async fn test_login_replaces_previous_credential() {
    let store = Arc::new(MemoryCredentialStore::new());
    let session = SessionStore::new(store.clone());

    session.login(test_credential()).await.unwrap();
    session
        .login(Credential::new("operator", "other"))
        .await
        .unwrap();

    assert_eq!(session.username().await.as_deref(), Some("operator"));
    assert_eq!(
        store.load().unwrap().map(|c| c.username),
        Some("operator".to_string())
    );
}

// =============================================================================
// File Credential Store
// =============================================================================

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credential.json"));

    assert_eq!(store.load().unwrap(), None);
    // Clearing nothing is fine
    store.clear().unwrap();
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("credential.json");
    let store = FileCredentialStore::new(&path);

    store.save(&test_credential()).unwrap();
    assert!(path.exists());
    assert_eq!(store.load().unwrap(), Some(test_credential()));

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["username"], "admin");

    store.clear().unwrap();
    assert!(!path.exists());
    assert_eq!(store.load().unwrap(), None);
}

#[cfg(unix)]
#[test]
fn test_file_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credential.json");
    let store = FileCredentialStore::new(&path);
    store.save(&test_credential()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
}

#[cfg(unix)]
#[test]
fn test_file_store_replaces_stale_temp_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credential.json");
    let stale = dir.path().join("credential.json.tmp");
    std::fs::write(&stale, b"old").unwrap();
    std::fs::set_permissions(&stale, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = FileCredentialStore::new(&path);
    store.save(&test_credential()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert!(!stale.exists());
    assert_eq!(store.load().unwrap(), Some(test_credential()));
}

#[test]
fn test_file_store_failed_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    // The target is a non-empty directory, so the final rename fails
    let path = dir.path().join("credential.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), b"x").unwrap();

    let store = FileCredentialStore::new(&path);
    assert!(matches!(
        store.save(&test_credential()),
        Err(AppError::Storage(_))
    ));
    assert!(!dir.path().join("credential.json.tmp").exists());
}

#[test]
fn test_file_store_corrupt_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credential.json");
    std::fs::write(&path, b"{not json").unwrap();

    let store = FileCredentialStore::new(&path);
    assert!(matches!(store.load(), Err(AppError::Storage(_))));
}

#[tokio::test]
async fn test_restore_from_corrupt_file_starts_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credential.json");
    std::fs::write(&path, b"garbage").unwrap();

    let session = SessionStore::new(Arc::new(FileCredentialStore::new(&path)));
    assert_eq!(session.restore().await, SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_session_survives_restart_via_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credential.json");

    let session = SessionStore::new(Arc::new(FileCredentialStore::new(&path)));
    session.login(test_credential()).await.unwrap();
    drop(session);

    // New process, same file
    let session = SessionStore::new(Arc::new(FileCredentialStore::new(&path)));
    assert_eq!(session.restore().await, SessionState::Authenticated);
    assert_eq!(session.current().await, Some(test_credential()));

    session.logout().await.unwrap();
    let session = SessionStore::new(Arc::new(FileCredentialStore::new(&path)));
    assert_eq!(session.restore().await, SessionState::Unauthenticated);
}
