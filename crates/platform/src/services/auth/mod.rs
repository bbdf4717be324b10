//! Account service.
//!
//! Registration and login over the account repository, session
//! manager, and notification log. Every operation suspends at a
//! simulated-latency point before touching state, modeling a backend
//! round-trip: callers can await, show a pending state, or cancel by
//! dropping the future. A future dropped during the latency sleep has
//! taken no lock and mutated nothing.

mod error;

pub use error::AuthError;

use std::sync::Arc;
use std::time::Duration;

use subsflow_core::{Credential, Email, NotificationKind, Role};

use crate::db::accounts::AccountRepository;
use crate::models::Account;
use crate::services::notifications::NotificationLog;
use crate::session::SessionManager;

/// Title of the registration welcome notification.
const WELCOME_TITLE: &str = "Welcome!";

/// Simulated backend latencies for the three operations.
#[derive(Debug, Clone, Copy)]
pub struct AuthLatency {
    /// Delay before `sign_up`/`sign_in` complete.
    pub api: Duration,
    /// Delay before `sign_out` completes.
    pub sign_out: Duration,
}

/// Authentication service.
///
/// Handles account registration, login, and logout.
pub struct AuthService {
    accounts: Arc<AccountRepository>,
    sessions: Arc<SessionManager>,
    notifications: Arc<NotificationLog>,
    latency: AuthLatency,
}

impl AuthService {
    /// Create a new authentication service.
    pub fn new(
        accounts: Arc<AccountRepository>,
        sessions: Arc<SessionManager>,
        notifications: Arc<NotificationLog>,
        latency: AuthLatency,
    ) -> Self {
        Self {
            accounts,
            sessions,
            notifications,
            latency,
        }
    }

    /// Register a new account, start its session, and append the
    /// welcome notification.
    ///
    /// A storage failure while recording the welcome notification is
    /// logged and swallowed; the registration still succeeds.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::Validation` if the full name or credential is empty.
    /// Returns `AuthError::AlreadyExists` if the email is already registered.
    pub async fn sign_up(
        &self,
        email: &str,
        credential: &str,
        full_name: &str,
        role: Role,
    ) -> Result<Account, AuthError> {
        let email = Email::parse(email)?;

        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthError::Validation("full name is required".to_owned()));
        }

        let credential = Credential::parse(credential)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Simulated backend round-trip; cancellation point.
        tokio::time::sleep(self.latency.api).await;

        let account = self
            .accounts
            .create(email, credential, full_name.to_owned(), role)
            .await?;

        self.sessions.start(&account).await?;

        // The account and session are the primary effects; a failed
        // welcome write must not surface as a failed registration.
        if let Err(e) = self
            .notifications
            .append(
                account.id,
                WELCOME_TITLE,
                &format!(
                    "Welcome to our subscription platform, {}! Explore our plans and get started.",
                    account.full_name
                ),
                NotificationKind::Success,
            )
            .await
        {
            tracing::warn!(
                account_id = %account.id,
                error = %e,
                "failed to record welcome notification"
            );
        }

        tracing::info!(account_id = %account.id, role = %account.role, "account registered");
        Ok(account)
    }

    /// Login with email and credential; starts a session on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or
    /// a wrong credential - one unified message for both.
    pub async fn sign_in(&self, email: &str, credential: &str) -> Result<Account, AuthError> {
        // A malformed email cannot name an account; fold it into the
        // unified invalid-credentials message.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        // Simulated backend round-trip; cancellation point.
        tokio::time::sleep(self.latency.api).await;

        let account = self
            .accounts
            .verify(&email, credential)
            .await
            .map_err(|_| AuthError::InvalidCredentials)?;

        self.sessions.start(&account).await?;

        tracing::info!(account_id = %account.id, "signed in");
        Ok(account)
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the durable session record
    /// cannot be cleared.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        tokio::time::sleep(self.latency.sign_out).await;
        self.sessions.end().await?;
        tracing::info!("signed out");
        Ok(())
    }
}
