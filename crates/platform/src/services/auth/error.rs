//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::session::SessionError;

/// Errors that can occur during authentication operations.
///
/// Every variant is recoverable by the caller; the `Display` strings
/// are the externally observable messages a UI shows. In particular,
/// unknown-email and wrong-credential sign-ins both surface the same
/// [`AuthError::InvalidCredentials`] message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] subsflow_core::EmailError),

    /// Invalid credentials (wrong credential or unknown account).
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An account with this email is already registered.
    #[error("User with this email already exists")]
    AlreadyExists,

    /// A required registration field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Session persistence failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Repository/storage error.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AuthError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(_) => Self::AlreadyExists,
            other => Self::Repository(other),
        }
    }
}
