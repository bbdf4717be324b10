//! Repositories for platform entities.
//!
//! The account map stands in for a real persistent store; the service
//! layer only sees the repository API, so a networked implementation
//! can replace it without touching service logic.

pub mod accounts;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The requested entity does not exist (or, for credential
    /// verification, the credential did not match - the two cases are
    /// deliberately indistinguishable).
    #[error("not found")]
    NotFound,

    /// A stored record could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Durable storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
