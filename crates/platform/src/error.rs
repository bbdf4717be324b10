//! Unified platform error type.
//!
//! Aggregates the layer errors for callers (like the CLI) that want a
//! single `Result` type. All variants are recoverable: they carry a
//! human-readable message for display and never abort the process.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::{AuthError, CatalogError};
use crate::session::SessionError;
use crate::storage::StorageError;

/// Platform-level error type.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Catalog or ledger operation failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Session persistence failed.
    #[error("{0}")]
    Session(#[from] SessionError),
}

/// Result type alias for `PlatformError`.
pub type Result<T> = std::result::Result<T, PlatformError>;
