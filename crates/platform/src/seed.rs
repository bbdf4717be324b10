//! Demo data seeding.
//!
//! Fixtures for the demo deployment: one admin, one regular user, and
//! the three standard plans. Seeding is idempotent - existing accounts
//! are skipped and plans are only created into an empty catalog.

use tracing::{debug, info};

use subsflow_core::{AccountId, Credential, Email, Price, Role};

use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;
use crate::models::{Account, NewPlan};
use crate::services::catalog::CatalogService;

struct DemoAccount {
    // Fixed so persisted sessions resolve across restarts.
    id: &'static str,
    email: &'static str,
    credential: &'static str,
    full_name: &'static str,
    role: Role,
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        id: "5d8c0d32-15a1-4f0f-8f3e-9a6c1b2d4e01",
        email: "admin@example.com",
        credential: "admin123",
        full_name: "Admin User",
        role: Role::Admin,
    },
    DemoAccount {
        id: "5d8c0d32-15a1-4f0f-8f3e-9a6c1b2d4e02",
        email: "user@example.com",
        credential: "user123",
        full_name: "John Doe",
        role: Role::User,
    },
];

/// Seed demo accounts and plans.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if a fixture fails to
/// parse - a programming error in the fixture table, not a runtime
/// condition.
pub(crate) async fn apply(
    accounts: &AccountRepository,
    catalog: &CatalogService,
) -> Result<(), RepositoryError> {
    for demo in DEMO_ACCOUNTS {
        let id = uuid::Uuid::parse_str(demo.id)
            .map(AccountId::from_uuid)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let email = Email::parse(demo.email)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let credential = Credential::parse(demo.credential)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        let account = Account {
            id,
            email,
            full_name: demo.full_name.to_owned(),
            role: demo.role,
        };

        match accounts.insert(account, credential).await {
            Ok(()) => info!(email = demo.email, account_id = %id, "seeded account"),
            Err(RepositoryError::Conflict(_)) => {
                debug!(email = demo.email, "account already present, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    if catalog.plans().await.is_empty() {
        for plan in demo_plans()? {
            catalog.create_plan(plan).await;
        }
        info!("seeded demo plans");
    }

    Ok(())
}

fn demo_plans() -> Result<Vec<NewPlan>, RepositoryError> {
    let price = |cents| {
        Price::from_cents(cents).map_err(|e| RepositoryError::DataCorruption(e.to_string()))
    };

    Ok(vec![
        NewPlan {
            name: "Basic Plan".to_owned(),
            description: "Perfect for getting started".to_owned(),
            price: price(999)?,
            duration_days: 30,
            features: vec![
                "Feature 1".to_owned(),
                "Feature 2".to_owned(),
                "Feature 3".to_owned(),
            ],
            is_active: true,
        },
        NewPlan {
            name: "Pro Plan".to_owned(),
            description: "For power users and businesses".to_owned(),
            price: price(2999)?,
            duration_days: 30,
            features: vec![
                "All Basic features".to_owned(),
                "Advanced Feature 1".to_owned(),
                "Advanced Feature 2".to_owned(),
                "Priority Support".to_owned(),
            ],
            is_active: true,
        },
        NewPlan {
            name: "Enterprise".to_owned(),
            description: "Custom solutions for large teams".to_owned(),
            price: price(9999)?,
            duration_days: 30,
            features: vec![
                "All Pro features".to_owned(),
                "Custom Integration".to_owned(),
                "Dedicated Support".to_owned(),
                "SLA Guarantee".to_owned(),
            ],
            is_active: true,
        },
    ])
}
