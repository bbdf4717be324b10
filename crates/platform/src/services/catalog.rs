//! Subscription catalog and ledger.
//!
//! Plan definitions are an ordered list managed by the administrative
//! surface; subscriptions are the ledger of purchases. Aggregates are
//! derived from the ledger's snapshots, never from a live join against
//! the current catalog, so deleting a plan cannot rewrite history.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::RwLock;

use subsflow_core::{AccountId, PlanId, SubscriptionId, SubscriptionStatus};

use crate::models::{NewPlan, Plan, Subscription};

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No plan with the given id exists in the catalog.
    #[error("plan not found: {0}")]
    PlanNotFound(PlanId),

    /// No subscription with the given id exists in the ledger.
    #[error("subscription not found: {0}")]
    SubscriptionNotFound(SubscriptionId),
}

#[derive(Debug, Default)]
struct CatalogState {
    plans: Vec<Plan>,
    subscriptions: Vec<Subscription>,
}

/// Plan catalog plus subscription ledger.
#[derive(Debug, Default)]
pub struct CatalogService {
    state: RwLock<CatalogState>,
}

impl CatalogService {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plan to the end of the catalog.
    pub async fn create_plan(&self, new_plan: NewPlan) -> Plan {
        let plan = Plan {
            id: PlanId::generate(),
            name: new_plan.name,
            description: new_plan.description,
            price: new_plan.price,
            duration_days: new_plan.duration_days,
            features: new_plan.features,
            is_active: new_plan.is_active,
        };

        let mut state = self.state.write().await;
        state.plans.push(plan.clone());
        tracing::info!(plan_id = %plan.id, name = %plan.name, "plan created");
        plan
    }

    /// Replace every field of an existing plan (the id stays).
    ///
    /// Existing subscriptions keep their snapshots.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist.
    pub async fn update_plan(&self, id: PlanId, fields: NewPlan) -> Result<Plan, CatalogError> {
        let mut state = self.state.write().await;
        let plan = state
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::PlanNotFound(id))?;

        plan.name = fields.name;
        plan.description = fields.description;
        plan.price = fields.price;
        plan.duration_days = fields.duration_days;
        plan.features = fields.features;
        plan.is_active = fields.is_active;

        Ok(plan.clone())
    }

    /// Remove a plan from the catalog.
    ///
    /// Existing subscriptions are untouched: they carry their own
    /// snapshot of the plan's terms.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist.
    pub async fn delete_plan(&self, id: PlanId) -> Result<(), CatalogError> {
        let mut state = self.state.write().await;
        let before = state.plans.len();
        state.plans.retain(|p| p.id != id);

        if state.plans.len() == before {
            return Err(CatalogError::PlanNotFound(id));
        }

        tracing::info!(plan_id = %id, "plan deleted");
        Ok(())
    }

    /// Toggle whether a plan is offered to new subscribers.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist.
    pub async fn set_active(&self, id: PlanId, is_active: bool) -> Result<Plan, CatalogError> {
        let mut state = self.state.write().await;
        let plan = state
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::PlanNotFound(id))?;

        plan.is_active = is_active;
        Ok(plan.clone())
    }

    /// The full ordered plan list.
    pub async fn plans(&self) -> Vec<Plan> {
        self.state.read().await.plans.clone()
    }

    /// Plans currently offered to new subscribers.
    pub async fn active_plans(&self) -> Vec<Plan> {
        self.state
            .read()
            .await
            .plans
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect()
    }

    /// Subscribe `account_id` to the plan with `plan_id`.
    ///
    /// Snapshots the plan's name, price, and duration onto the
    /// subscription; the window runs from now for `duration_days`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist
    /// in the catalog right now.
    pub async fn subscribe(
        &self,
        account_id: AccountId,
        plan_id: PlanId,
    ) -> Result<Subscription, CatalogError> {
        let mut state = self.state.write().await;
        let plan = state
            .plans
            .iter()
            .find(|p| p.id == plan_id)
            .ok_or(CatalogError::PlanNotFound(plan_id))?;

        let start_date = Utc::now();
        let subscription = Subscription {
            id: SubscriptionId::generate(),
            account_id,
            plan_id,
            plan_name: plan.name.clone(),
            price: plan.price,
            duration_days: plan.duration_days,
            status: SubscriptionStatus::Active,
            start_date,
            end_date: start_date + Duration::days(i64::from(plan.duration_days)),
        };

        state.subscriptions.push(subscription.clone());
        tracing::info!(
            subscription_id = %subscription.id,
            %account_id,
            %plan_id,
            "subscription created"
        );
        Ok(subscription)
    }

    /// Cancel a subscription. Idempotent: cancelling an already
    /// cancelled subscription is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SubscriptionNotFound` if the id is
    /// unknown.
    pub async fn cancel(&self, id: SubscriptionId) -> Result<Subscription, CatalogError> {
        let mut state = self.state.write().await;
        let subscription = state
            .subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(CatalogError::SubscriptionNotFound(id))?;

        subscription.status = SubscriptionStatus::Cancelled;
        Ok(subscription.clone())
    }

    /// All subscriptions for one account, in creation order.
    pub async fn subscriptions_for(&self, account_id: AccountId) -> Vec<Subscription> {
        self.state
            .read()
            .await
            .subscriptions
            .iter()
            .filter(|s| s.account_id == account_id)
            .cloned()
            .collect()
    }

    /// Total number of subscriptions in the ledger, regardless of
    /// per-plan activity or status.
    pub async fn active_subscription_count(&self) -> usize {
        self.state.read().await.subscriptions.len()
    }

    /// Sum of the ledger's snapshot prices.
    ///
    /// Uses the price recorded at subscription time, so a deleted or
    /// re-priced plan does not silently change historical revenue.
    pub async fn recurring_revenue(&self) -> Decimal {
        self.state
            .read()
            .await
            .subscriptions
            .iter()
            .map(|s| s.price.amount())
            .sum()
    }
}
