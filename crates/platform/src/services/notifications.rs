//! Notification log.
//!
//! Append-only per-account messages with read/unread state, persisted
//! as one JSON array under [`keys::NOTIFICATIONS`]. Every write is a
//! read-modify-write of the whole array, serialized through an async
//! mutex so concurrent appends never clobber each other.

use chrono::Utc;
use tokio::sync::Mutex;

use std::sync::Arc;

use subsflow_core::{AccountId, NotificationId, NotificationKind};

use crate::db::RepositoryError;
use crate::models::Notification;
use crate::storage::{Storage, keys};

/// Append-only notification log over durable storage.
pub struct NotificationLog {
    storage: Arc<dyn Storage>,
    // Serializes read-modify-write cycles on the stored array.
    write_lock: Mutex<()>,
}

impl NotificationLog {
    /// Create a log over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Append a new unread notification for `account_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the log cannot be
    /// persisted.
    pub async fn append(
        &self,
        account_id: AccountId,
        title: &str,
        message: &str,
        kind: NotificationKind,
    ) -> Result<Notification, RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.load_all()?;
        let notification = Notification {
            id: NotificationId::generate(),
            account_id,
            title: title.to_owned(),
            message: message.to_owned(),
            kind,
            is_read: false,
            created_at: Utc::now(),
        };
        all.push(notification.clone());
        self.store_all(&all)?;

        tracing::debug!(%account_id, title, "notification appended");
        Ok(notification)
    }

    /// All notifications for `account_id`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the log cannot be read.
    pub async fn list_for(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let all = self.load_all()?;
        Ok(all
            .into_iter()
            .filter(|n| n.account_id == account_id)
            .collect())
    }

    /// Mark a notification as read.
    ///
    /// Idempotent: marking an already-read notification is a no-op
    /// (and skips the storage write).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no notification has the
    /// given id, or `RepositoryError::Storage` on persistence failure.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.load_all()?;
        let notification = all
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if notification.is_read {
            return Ok(());
        }

        notification.is_read = true;
        self.store_all(&all)?;
        Ok(())
    }

    /// Number of unread notifications for `account_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the log cannot be read.
    pub async fn unread_count(&self, account_id: AccountId) -> Result<usize, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let all = self.load_all()?;
        Ok(all
            .iter()
            .filter(|n| n.account_id == account_id && !n.is_read)
            .count())
    }

    // Absent and malformed records both read as an empty log; the next
    // append rewrites the slot with well-formed JSON.
    fn load_all(&self) -> Result<Vec<Notification>, RepositoryError> {
        let Some(raw) = self.storage.load(keys::NOTIFICATIONS)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(all) => Ok(all),
            Err(e) => {
                tracing::warn!(error = %e, "malformed notification log, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn store_all(&self, all: &[Notification]) -> Result<(), RepositoryError> {
        let serialized = serde_json::to_string(all)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        self.storage.store(keys::NOTIFICATIONS, &serialized)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn log() -> NotificationLog {
        NotificationLog::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_append_and_list_in_creation_order() {
        let log = log();
        let account = AccountId::generate();

        log.append(account, "Welcome!", "first", NotificationKind::Success)
            .await
            .unwrap();
        log.append(account, "Renewal", "second", NotificationKind::Info)
            .await
            .unwrap();

        let listed = log.list_for(account).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Welcome!");
        assert_eq!(listed[1].title, "Renewal");
    }

    #[tokio::test]
    async fn test_list_filters_by_account() {
        let log = log();
        let a = AccountId::generate();
        let b = AccountId::generate();

        log.append(a, "for a", "x", NotificationKind::Info)
            .await
            .unwrap();
        log.append(b, "for b", "y", NotificationKind::Info)
            .await
            .unwrap();

        let for_a = log.list_for(a).await.unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].title, "for a");
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let log = log();
        let account = AccountId::generate();
        let n = log
            .append(account, "Welcome!", "hi", NotificationKind::Success)
            .await
            .unwrap();

        assert_eq!(log.unread_count(account).await.unwrap(), 1);

        log.mark_read(n.id).await.unwrap();
        log.mark_read(n.id).await.unwrap();

        let listed = log.list_for(account).await.unwrap();
        assert_eq!(listed.len(), 1, "record neither duplicated nor removed");
        assert!(listed[0].is_read);
        assert_eq!(log.unread_count(account).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id() {
        let log = log();
        let err = log.mark_read(NotificationId::generate()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_malformed_log_reads_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.store(keys::NOTIFICATIONS, "not json").unwrap();

        let log = NotificationLog::new(storage);
        let account = AccountId::generate();
        assert!(log.list_for(account).await.unwrap().is_empty());

        // Appending over the corrupt slot restores a valid log.
        log.append(account, "Welcome!", "hi", NotificationKind::Success)
            .await
            .unwrap();
        assert_eq!(log.list_for(account).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_appends_not_replaces() {
        let storage = Arc::new(MemoryStorage::new());
        let account = AccountId::generate();

        {
            let log = NotificationLog::new(storage.clone());
            log.append(account, "first", "x", NotificationKind::Info)
                .await
                .unwrap();
        }

        // A fresh log over the same storage sees the earlier entry.
        let log = NotificationLog::new(storage);
        log.append(account, "second", "y", NotificationKind::Info)
            .await
            .unwrap();
        assert_eq!(log.list_for(account).await.unwrap().len(), 2);
    }
}
