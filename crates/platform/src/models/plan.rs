//! Subscription plan types.

use serde::{Deserialize, Serialize};

use subsflow_core::{PlanId, Price};

/// A purchasable subscription tier definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique plan ID.
    pub id: PlanId,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Recurring price per billing period.
    pub price: Price,
    /// Billing period length in days.
    pub duration_days: u32,
    /// Ordered feature list.
    pub features: Vec<String>,
    /// Whether the plan is offered to new subscribers.
    pub is_active: bool,
}

/// Plan fields supplied by the administrative surface.
///
/// The catalog assigns the ID on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlan {
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Recurring price per billing period.
    pub price: Price,
    /// Billing period length in days.
    pub duration_days: u32,
    /// Ordered feature list.
    pub features: Vec<String>,
    /// Whether the plan is offered to new subscribers.
    pub is_active: bool,
}
