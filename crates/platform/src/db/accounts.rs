//! Account repository.
//!
//! Holds the email-keyed account map that models the platform's user
//! database. Credentials live next to accounts in the record, never
//! inside the domain type, so an [`Account`] can be handed to callers
//! without dragging the secret along.

use std::collections::HashMap;

use tokio::sync::Mutex;

use subsflow_core::{AccountId, Credential, Email, Role};

use super::RepositoryError;
use crate::models::Account;

/// One entry of the account map: the credential plus the profile it
/// guards.
#[derive(Debug)]
struct AccountRecord {
    credential: Credential,
    account: Account,
}

/// Repository for account records.
///
/// All mutations go through one async [`Mutex`], so a check-then-insert
/// cannot interleave with another mutation even when the calling task
/// suspends elsewhere: no two concurrent registrations for the same
/// email can both succeed.
#[derive(Debug, Default)]
pub struct AccountRepository {
    records: Mutex<HashMap<Email, AccountRecord>>,
}

impl AccountRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account.
    ///
    /// The existence check and the insert happen under a single lock
    /// guard (atomic check-then-insert).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered.
    pub async fn create(
        &self,
        email: Email,
        credential: Credential,
        full_name: String,
        role: Role,
    ) -> Result<Account, RepositoryError> {
        let mut records = self.records.lock().await;

        if records.contains_key(&email) {
            return Err(RepositoryError::Conflict(
                "email already exists".to_owned(),
            ));
        }

        let account = Account {
            id: AccountId::generate(),
            email: email.clone(),
            full_name,
            role,
        };

        records.insert(
            email,
            AccountRecord {
                credential,
                account: account.clone(),
            },
        );

        Ok(account)
    }

    /// Insert a fully formed account, keeping its ID.
    ///
    /// Used by fixtures, which need deterministic IDs so persisted
    /// sessions resolve across process restarts. Registration goes
    /// through [`create`](Self::create) instead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered.
    pub async fn insert(
        &self,
        account: Account,
        credential: Credential,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;

        if records.contains_key(&account.email) {
            return Err(RepositoryError::Conflict(
                "email already exists".to_owned(),
            ));
        }

        records.insert(
            account.email.clone(),
            AccountRecord {
                credential,
                account,
            },
        );

        Ok(())
    }

    /// Get an account by its email address.
    pub async fn get_by_email(&self, email: &Email) -> Option<Account> {
        let records = self.records.lock().await;
        records.get(email).map(|r| r.account.clone())
    }

    /// Get an account by its ID.
    pub async fn get_by_id(&self, id: AccountId) -> Option<Account> {
        let records = self.records.lock().await;
        records
            .values()
            .find(|r| r.account.id == id)
            .map(|r| r.account.clone())
    }

    /// Verify a presented credential against the stored one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` both when no account exists
    /// for `email` and when the credential does not match. Callers must
    /// surface one unified message for both so an attacker cannot
    /// probe which emails are registered.
    pub async fn verify(&self, email: &Email, presented: &str) -> Result<Account, RepositoryError> {
        let records = self.records.lock().await;

        let record = records.get(email).ok_or(RepositoryError::NotFound)?;
        if !record.credential.matches(presented) {
            return Err(RepositoryError::NotFound);
        }

        Ok(record.account.clone())
    }

    /// Number of registered accounts.
    pub async fn count(&self) -> usize {
        let records = self.records.lock().await;
        records.len()
    }
}
