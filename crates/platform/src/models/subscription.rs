//! Subscription domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use subsflow_core::{AccountId, PlanId, Price, SubscriptionId, SubscriptionStatus};

/// An account's purchase of a plan for a bounded time window.
///
/// `plan_name`, `price`, and `duration_days` are snapshots of the plan
/// as it was at subscription time. Deleting or editing the plan later
/// does not touch them, so historical revenue stays stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique subscription ID.
    pub id: SubscriptionId,
    /// Subscribing account.
    pub account_id: AccountId,
    /// Plan this subscription was created from.
    pub plan_id: PlanId,
    /// Plan name at subscription time.
    pub plan_name: String,
    /// Plan price at subscription time.
    pub price: Price,
    /// Plan billing period at subscription time, in days.
    pub duration_days: u32,
    /// Lifecycle status (action-driven only).
    pub status: SubscriptionStatus,
    /// When the subscription started.
    pub start_date: DateTime<Utc>,
    /// When the current billing window ends.
    pub end_date: DateTime<Utc>,
}
