//! Session manager.
//!
//! Issues, persists, and restores the single active session. The
//! in-memory identity is a tri-state: callers that render anything
//! identity-dependent must wait until the state leaves [`AuthState::Loading`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use subsflow_core::AccountId;

use crate::db::accounts::AccountRepository;
use crate::models::{Account, CurrentUser, SessionRecord};
use crate::storage::{Storage, StorageError, keys};

/// Errors that can occur while persisting the session.
///
/// Reading the session back never errors: a malformed or unreadable
/// record degrades to the anonymous state instead.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Durable storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The session record could not be serialized.
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The observable identity tri-state.
///
/// `Loading` is the initial state and holds until [`SessionManager::restore`]
/// resolves; downstream consumers key their entire view off this.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Session restoration has not resolved yet.
    #[default]
    Loading,
    /// An account is signed in.
    Authenticated {
        /// The session-stored identity.
        user: CurrentUser,
        /// The full profile fetched for the identity.
        profile: Account,
    },
    /// No session.
    Anonymous,
}

impl AuthState {
    /// The signed-in account ID, if any.
    #[must_use]
    pub const fn account_id(&self) -> Option<AccountId> {
        match self {
            Self::Authenticated { user, .. } => Some(user.id),
            Self::Loading | Self::Anonymous => None,
        }
    }

    /// Whether restoration is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Issues, persists, and restores the process's single session.
pub struct SessionManager {
    storage: Arc<dyn Storage>,
    state: RwLock<AuthState>,
    profile_latency: Duration,
}

impl SessionManager {
    /// Create a session manager over `storage`.
    ///
    /// `profile_latency` models the out-of-process profile fetch that
    /// [`restore`](Self::restore) awaits.
    pub fn new(storage: Arc<dyn Storage>, profile_latency: Duration) -> Self {
        Self {
            storage,
            state: RwLock::new(AuthState::Loading),
            profile_latency,
        }
    }

    /// Start a session for `account`: persist the durable record and
    /// set the in-memory identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the record cannot be persisted; the
    /// in-memory state is left unchanged in that case.
    pub async fn start(&self, account: &Account) -> Result<(), SessionError> {
        let user = CurrentUser {
            id: account.id,
            email: account.email.clone(),
        };
        let record = SessionRecord { user: user.clone() };

        let serialized = serde_json::to_string(&record)?;
        self.storage.store(keys::SESSION, &serialized)?;

        let mut state = self.state.write().await;
        *state = AuthState::Authenticated {
            user,
            profile: account.clone(),
        };

        tracing::debug!(account_id = %account.id, "session started");
        Ok(())
    }

    /// Restore the persisted session at process start.
    ///
    /// Resolves the tri-state no matter what it finds: absent,
    /// unreadable, or malformed records and dangling account
    /// references all degrade to [`AuthState::Anonymous`] rather than
    /// failing startup. The profile fetch is an awaited suspension
    /// point; dropping the future before it resolves leaves the state
    /// at `Loading` and corrupts nothing.
    pub async fn restore(&self, accounts: &AccountRepository) {
        let resolved = self.resolve_persisted(accounts).await;
        let mut state = self.state.write().await;
        *state = resolved;
    }

    async fn resolve_persisted(&self, accounts: &AccountRepository) -> AuthState {
        let raw = match self.storage.load(keys::SESSION) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AuthState::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted session");
                return AuthState::Anonymous;
            }
        };

        let record: SessionRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "malformed persisted session, treating as anonymous");
                return AuthState::Anonymous;
            }
        };

        // Simulated out-of-process profile fetch; cancellable await point.
        tokio::time::sleep(self.profile_latency).await;

        match accounts.get_by_id(record.user.id).await {
            Some(profile) => {
                tracing::info!(account_id = %record.user.id, "session restored");
                AuthState::Authenticated {
                    user: record.user,
                    profile,
                }
            }
            None => {
                tracing::warn!(
                    account_id = %record.user.id,
                    "persisted session references unknown account"
                );
                AuthState::Anonymous
            }
        }
    }

    /// End the session: clear durable storage and the in-memory
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the durable record cannot be removed.
    pub async fn end(&self) -> Result<(), SessionError> {
        self.storage.remove(keys::SESSION)?;

        let mut state = self.state.write().await;
        *state = AuthState::Anonymous;

        tracing::debug!("session ended");
        Ok(())
    }

    /// The current observable identity state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use subsflow_core::{Credential, Email, Role};

    use super::*;
    use crate::storage::MemoryStorage;

    const NO_LATENCY: Duration = Duration::ZERO;

    async fn seeded_repo() -> (AccountRepository, Account) {
        let repo = AccountRepository::new();
        let account = repo
            .create(
                Email::parse("jane@example.com").unwrap(),
                Credential::parse("pw").unwrap(),
                "Jane Doe".to_owned(),
                Role::User,
            )
            .await
            .unwrap();
        (repo, account)
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let sessions = SessionManager::new(Arc::new(MemoryStorage::new()), NO_LATENCY);
        assert!(sessions.state().await.is_loading());
    }

    #[tokio::test]
    async fn test_start_persists_and_authenticates() {
        let storage = Arc::new(MemoryStorage::new());
        let sessions = SessionManager::new(storage.clone(), NO_LATENCY);
        let (_, account) = seeded_repo().await;

        sessions.start(&account).await.unwrap();

        assert_eq!(sessions.state().await.account_id(), Some(account.id));
        let raw = storage.load(keys::SESSION).unwrap().unwrap();
        let record: SessionRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.user.id, account.id);
    }

    #[tokio::test]
    async fn test_restore_roundtrip_in_fresh_process() {
        let storage = Arc::new(MemoryStorage::new());
        let (repo, account) = seeded_repo().await;

        // First "process" signs in.
        let first = SessionManager::new(storage.clone(), NO_LATENCY);
        first.start(&account).await.unwrap();

        // Second "process" over the same storage restores the identity.
        let second = SessionManager::new(storage, NO_LATENCY);
        second.restore(&repo).await;

        match second.state().await {
            AuthState::Authenticated { user, profile } => {
                assert_eq!(user.id, account.id);
                assert_eq!(profile.full_name, "Jane Doe");
            }
            other => panic!("expected authenticated state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_restore_without_record_is_anonymous() {
        let (repo, _) = seeded_repo().await;
        let sessions = SessionManager::new(Arc::new(MemoryStorage::new()), NO_LATENCY);
        sessions.restore(&repo).await;
        assert_eq!(sessions.state().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_restore_corrupt_record_is_anonymous_not_a_crash() {
        let storage = Arc::new(MemoryStorage::new());
        storage.store(keys::SESSION, "{not json").unwrap();

        let (repo, _) = seeded_repo().await;
        let sessions = SessionManager::new(storage, NO_LATENCY);
        sessions.restore(&repo).await;
        assert_eq!(sessions.state().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_restore_dangling_account_is_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        let record = SessionRecord {
            user: CurrentUser {
                id: AccountId::generate(),
                email: Email::parse("ghost@example.com").unwrap(),
            },
        };
        storage
            .store(keys::SESSION, &serde_json::to_string(&record).unwrap())
            .unwrap();

        let repo = AccountRepository::new();
        let sessions = SessionManager::new(storage, NO_LATENCY);
        sessions.restore(&repo).await;
        assert_eq!(sessions.state().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_end_clears_storage_and_state() {
        let storage = Arc::new(MemoryStorage::new());
        let sessions = SessionManager::new(storage.clone(), NO_LATENCY);
        let (_, account) = seeded_repo().await;

        sessions.start(&account).await.unwrap();
        sessions.end().await.unwrap();

        assert_eq!(sessions.state().await, AuthState::Anonymous);
        assert!(storage.load(keys::SESSION).unwrap().is_none());
    }
}
