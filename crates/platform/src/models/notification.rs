//! Notification domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use subsflow_core::{AccountId, NotificationId, NotificationKind};

/// An asynchronous message surfaced to one account.
///
/// Appended by system events (currently only the welcome flow) and
/// mutated only by the read-state toggle. Never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification ID.
    pub id: NotificationId,
    /// Account the message is addressed to.
    pub account_id: AccountId,
    /// Short headline.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Severity kind.
    pub kind: NotificationKind,
    /// Whether the account has seen the message.
    pub is_read: bool,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}
