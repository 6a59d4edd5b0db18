//! Credential persistence.
//!
//! The session survives restarts through a single persisted credential;
//! whether one is stored is the only thing `restore` looks at.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use crate::error::AppError;
use crate::models::Credential;

/// Durable slot for the current credential.
pub trait CredentialStore: Send + Sync {
    /// Read the persisted credential, `None` if nothing is stored.
    fn load(&self) -> Result<Option<Credential>, AppError>;

    /// Persist `credential`, replacing any previous one.
    fn save(&self, credential: &Credential) -> Result<(), AppError>;

    /// Remove the persisted credential. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), AppError>;
}
