//! Account domain type.

use serde::{Deserialize, Serialize};

use subsflow_core::{AccountId, Email, Role};

/// A registered identity (domain type).
///
/// Created once at registration and never edited or deleted - the
/// platform has no profile-edit or account-delete operation. The
/// credential is deliberately not part of this type; the repository
/// keeps it alongside the account, never inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Account email address (unique, case-sensitive as given).
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// Permission role.
    pub role: Role,
}
