//! Session-related types.
//!
//! Types stored in the durable session record.

use serde::{Deserialize, Serialize};

use subsflow_core::{AccountId, Email};

/// Session-stored identity.
///
/// Minimal data persisted to identify the logged-in account across
/// restarts. The full profile is re-fetched on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account ID.
    pub id: AccountId,
    /// Account email address.
    pub email: Email,
}

/// The durable session record at [`crate::storage::keys::SESSION`].
///
/// Wire shape: `{"user": {"id": ..., "email": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The logged-in identity.
    pub user: CurrentUser,
}
