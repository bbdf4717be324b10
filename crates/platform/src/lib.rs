//! SubsFlow platform - account, session, and subscription state manager.
//!
//! The backend-shaped core of the SubsFlow demo. [`Platform`] wires
//! together the account repository, session manager, subscription
//! catalog, and notification log, and exposes the surface a UI
//! consumes: the identity tri-state, `sign_up`/`sign_in`/`sign_out`,
//! plan and subscription queries, notifications, and aggregate stats.
//!
//! # Architecture
//!
//! - [`storage`] - injected durable key/value slots (session record,
//!   notification log)
//! - [`db`] - the account repository (the demo's user database)
//! - [`session`] - single-session issue/persist/restore with an
//!   observable loading state
//! - [`services`] - auth, catalog/ledger, and notification services
//!
//! No operation here can crash the process: every failure path is a
//! typed, display-ready error, and malformed durable state degrades to
//! absence.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
mod seed;
pub mod services;
pub mod session;
pub mod storage;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use subsflow_core::{AccountId, NotificationId, PlanId, Role, SubscriptionId};

use crate::config::PlatformConfig;
use crate::db::accounts::AccountRepository;
use crate::error::PlatformError;
use crate::models::{Account, NewPlan, Notification, Plan, Subscription};
use crate::services::auth::{AuthError, AuthLatency, AuthService};
use crate::services::catalog::{CatalogError, CatalogService};
use crate::services::notifications::NotificationLog;
use crate::session::{AuthState, SessionManager};
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Aggregate platform metrics for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Number of registered accounts.
    pub total_users: usize,
    /// Number of subscriptions in the ledger.
    pub active_subscriptions: usize,
    /// Sum of the ledger's snapshot prices.
    pub recurring_revenue: Decimal,
}

struct PlatformInner {
    config: PlatformConfig,
    accounts: Arc<AccountRepository>,
    sessions: Arc<SessionManager>,
    catalog: Arc<CatalogService>,
    notifications: Arc<NotificationLog>,
    auth: AuthService,
}

/// The platform state manager.
///
/// Cheaply cloneable via `Arc`; all clones share the same state.
#[derive(Clone)]
pub struct Platform {
    inner: Arc<PlatformInner>,
}

impl Platform {
    /// Create a platform from configuration.
    ///
    /// Uses file-backed storage when `config.data_dir` is set,
    /// in-memory storage otherwise.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Storage` if the data directory cannot
    /// be created.
    pub fn new(config: PlatformConfig) -> Result<Self, PlatformError> {
        let storage: Arc<dyn Storage> = match &config.data_dir {
            Some(dir) => Arc::new(FileStorage::open(dir)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Ok(Self::with_storage(config, storage))
    }

    /// Create a platform over an explicit storage backend.
    #[must_use]
    pub fn with_storage(config: PlatformConfig, storage: Arc<dyn Storage>) -> Self {
        let accounts = Arc::new(AccountRepository::new());
        let sessions = Arc::new(SessionManager::new(
            storage.clone(),
            config.profile_latency,
        ));
        let notifications = Arc::new(NotificationLog::new(storage));
        let catalog = Arc::new(CatalogService::new());

        let auth = AuthService::new(
            accounts.clone(),
            sessions.clone(),
            notifications.clone(),
            AuthLatency {
                api: config.api_latency,
                sign_out: config.sign_out_latency,
            },
        );

        Self {
            inner: Arc::new(PlatformInner {
                config,
                accounts,
                sessions,
                catalog,
                notifications,
                auth,
            }),
        }
    }

    /// Get a reference to the platform configuration.
    #[must_use]
    pub fn config(&self) -> &PlatformConfig {
        &self.inner.config
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The observable identity tri-state.
    ///
    /// Starts as [`AuthState::Loading`]; callers must not render
    /// identity-dependent views until [`restore_session`](Self::restore_session)
    /// (or a sign-in) resolves it.
    pub async fn current_identity(&self) -> AuthState {
        self.inner.sessions.state().await
    }

    /// Seed demo accounts and plans, regardless of configuration.
    ///
    /// Idempotent; see the module fixtures for what gets created.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Repository` if seeding fails.
    pub async fn seed_demo_data(&self) -> Result<(), PlatformError> {
        Ok(seed::apply(&self.inner.accounts, &self.inner.catalog).await?)
    }

    /// Restore the persisted session, if any, and resolve the
    /// tri-state. Seeds demo data first when configured to.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Repository` only for seeding failures;
    /// restoration itself degrades to anonymous instead of erroring.
    pub async fn restore_session(&self) -> Result<AuthState, PlatformError> {
        if self.inner.config.seed_demo_data {
            seed::apply(&self.inner.accounts, &self.inner.catalog).await?;
        }
        self.inner.sessions.restore(&self.inner.accounts).await;
        Ok(self.inner.sessions.state().await)
    }

    /// Register a new account; on success the session is started and
    /// a welcome notification is appended.
    ///
    /// # Errors
    ///
    /// See [`AuthService::sign_up`].
    pub async fn sign_up(
        &self,
        email: &str,
        credential: &str,
        full_name: &str,
        role: Role,
    ) -> Result<Account, AuthError> {
        self.inner.auth.sign_up(email, credential, full_name, role).await
    }

    /// Sign in with email and credential.
    ///
    /// # Errors
    ///
    /// See [`AuthService::sign_in`].
    pub async fn sign_in(&self, email: &str, credential: &str) -> Result<Account, AuthError> {
        self.inner.auth.sign_in(email, credential).await
    }

    /// Sign out, clearing the persisted session.
    ///
    /// # Errors
    ///
    /// See [`AuthService::sign_out`].
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.auth.sign_out().await
    }

    // =========================================================================
    // Catalog & ledger
    // =========================================================================

    /// The full ordered plan list.
    pub async fn plans(&self) -> Vec<Plan> {
        self.inner.catalog.plans().await
    }

    /// Plans currently offered to new subscribers.
    pub async fn active_plans(&self) -> Vec<Plan> {
        self.inner.catalog.active_plans().await
    }

    /// Add a plan to the catalog.
    pub async fn create_plan(&self, new_plan: NewPlan) -> Plan {
        self.inner.catalog.create_plan(new_plan).await
    }

    /// Update an existing plan.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist.
    pub async fn update_plan(&self, id: PlanId, fields: NewPlan) -> Result<Plan, CatalogError> {
        self.inner.catalog.update_plan(id, fields).await
    }

    /// Delete a plan; existing subscriptions keep their snapshots.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist.
    pub async fn delete_plan(&self, id: PlanId) -> Result<(), CatalogError> {
        self.inner.catalog.delete_plan(id).await
    }

    /// Toggle a plan's availability to new subscribers.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist.
    pub async fn set_plan_active(&self, id: PlanId, is_active: bool) -> Result<Plan, CatalogError> {
        self.inner.catalog.set_active(id, is_active).await
    }

    /// Subscribe an account to a plan, snapshotting the plan's terms.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PlanNotFound` if the plan does not exist.
    pub async fn subscribe(
        &self,
        account_id: AccountId,
        plan_id: PlanId,
    ) -> Result<Subscription, CatalogError> {
        self.inner.catalog.subscribe(account_id, plan_id).await
    }

    /// Cancel a subscription (idempotent).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SubscriptionNotFound` if the id is unknown.
    pub async fn cancel_subscription(
        &self,
        id: SubscriptionId,
    ) -> Result<Subscription, CatalogError> {
        self.inner.catalog.cancel(id).await
    }

    /// All subscriptions for one account.
    pub async fn subscriptions_for(&self, account_id: AccountId) -> Vec<Subscription> {
        self.inner.catalog.subscriptions_for(account_id).await
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// All notifications for one account, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Repository` if the log cannot be read.
    pub async fn notifications_for(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Notification>, PlatformError> {
        Ok(self.inner.notifications.list_for(account_id).await?)
    }

    /// Mark a notification as read (idempotent).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Repository` if the id is unknown or the
    /// log cannot be persisted.
    pub async fn mark_notification_read(&self, id: NotificationId) -> Result<(), PlatformError> {
        Ok(self.inner.notifications.mark_read(id).await?)
    }

    /// Number of unread notifications for one account.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Repository` if the log cannot be read.
    pub async fn unread_count(&self, account_id: AccountId) -> Result<usize, PlatformError> {
        Ok(self.inner.notifications.unread_count(account_id).await?)
    }

    // =========================================================================
    // Stats
    // =========================================================================

    /// Aggregate metrics for the admin dashboard.
    pub async fn stats(&self) -> Stats {
        Stats {
            total_users: self.inner.accounts.count().await,
            active_subscriptions: self.inner.catalog.active_subscription_count().await,
            recurring_revenue: self.inner.catalog.recurring_revenue().await,
        }
    }
}
