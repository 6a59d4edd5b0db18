// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file credential store.

use crate::db::CredentialStore;
use crate::error::AppError;
use crate::models::Credential;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Stores the credential as a JSON document in one file.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash never leaves a half-written credential behind.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "credential".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Write `body` to a fresh file at `path` that only the owner can read.
fn write_private(path: &Path, body: &[u8]) -> Result<(), AppError> {
    // A leftover temp file would keep its old mode through the open below
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(AppError::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            )))
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| AppError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    file.write_all(body)
        .and_then(|()| file.sync_all())
        .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", path.display(), e)))
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, AppError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&raw).map(Some).map_err(|e| {
            AppError::Storage(format!("Corrupt credential file {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, credential: &Credential) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let body = serde_json::to_vec(credential)
            .map_err(|e| AppError::Storage(format!("Failed to encode credential: {}", e)))?;

        let tmp = self.temp_path();
        let result = write_private(&tmp, &body).and_then(|()| {
            fs::rename(&tmp, &self.path).map_err(|e| {
                AppError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
            })
        });
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result?;

        tracing::debug!(path = %self.path.display(), "Credential persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Persisted credential removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
