//! Plan catalog and subscription ledger scenarios through the facade.

use rust_decimal::Decimal;
use subsflow_core::{Price, SubscriptionStatus};
use subsflow_platform::models::NewPlan;
use subsflow_platform::services::CatalogError;

use subsflow_integration_tests::demo_platform;

#[tokio::test]
async fn test_demo_catalog_contents() {
    let platform = demo_platform();
    platform.restore_session().await.unwrap();

    let plans = platform.plans().await;
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].name, "Basic Plan");
    assert_eq!(plans[1].name, "Pro Plan");
    assert_eq!(plans[2].name, "Enterprise");
    assert!(plans.iter().all(|p| p.is_active && p.duration_days == 30));
    assert_eq!(platform.active_plans().await.len(), 3);
}

#[tokio::test]
async fn test_subscribe_and_cancel_through_facade() {
    let platform = demo_platform();
    platform.restore_session().await.unwrap();

    let account = platform
        .sign_in("user@example.com", "user123")
        .await
        .unwrap();
    let plans = platform.plans().await;

    let subscription = platform.subscribe(account.id, plans[0].id).await.unwrap();
    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(subscription.plan_name, "Basic Plan");

    let cancelled = platform
        .cancel_subscription(subscription.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, SubscriptionStatus::Cancelled);

    let mine = platform.subscriptions_for(account.id).await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, SubscriptionStatus::Cancelled);
}

#[tokio::test]
async fn test_stats_track_ledger_snapshots_across_plan_deletion() {
    let platform = demo_platform();
    platform.restore_session().await.unwrap();

    let account = platform
        .sign_in("user@example.com", "user123")
        .await
        .unwrap();
    let plans = platform.plans().await;
    let basic = plans[0].clone();
    let pro = plans[1].clone();

    platform.subscribe(account.id, basic.id).await.unwrap();
    platform.subscribe(account.id, pro.id).await.unwrap();

    let stats = platform.stats().await;
    assert_eq!(stats.active_subscriptions, 2);
    // 9.99 + 29.99
    assert_eq!(stats.recurring_revenue, Decimal::new(3998, 2));

    // Deleting the plan must not rewrite the ledger's history.
    platform.delete_plan(basic.id).await.unwrap();
    assert_eq!(platform.plans().await.len(), 2);

    let after = platform.stats().await;
    assert_eq!(after.active_subscriptions, 2);
    assert_eq!(after.recurring_revenue, Decimal::new(3998, 2));

    let mine = platform.subscriptions_for(account.id).await;
    assert_eq!(mine[0].plan_name, "Basic Plan");
    assert_eq!(mine[0].price, basic.price);
}

#[tokio::test]
async fn test_deactivated_plan_leaves_catalog_listing_intact() {
    let platform = demo_platform();
    platform.restore_session().await.unwrap();

    let plans = platform.plans().await;
    let toggled = platform.set_plan_active(plans[0].id, false).await.unwrap();
    assert!(!toggled.is_active);

    assert_eq!(platform.plans().await.len(), 3);
    assert_eq!(platform.active_plans().await.len(), 2);
}

#[tokio::test]
async fn test_admin_plan_management_round_trip() {
    let platform = demo_platform();
    platform.restore_session().await.unwrap();

    platform
        .sign_in("admin@example.com", "admin123")
        .await
        .unwrap();

    let created = platform
        .create_plan(NewPlan {
            name: "Student".to_owned(),
            description: "Discounted access".to_owned(),
            price: Price::from_cents(499).unwrap(),
            duration_days: 30,
            features: vec!["Feature 1".to_owned()],
            is_active: true,
        })
        .await;
    assert_eq!(platform.plans().await.len(), 4);

    let updated = platform
        .update_plan(
            created.id,
            NewPlan {
                name: "Student".to_owned(),
                description: "Discounted access".to_owned(),
                price: Price::from_cents(599).unwrap(),
                duration_days: 30,
                features: vec!["Feature 1".to_owned()],
                is_active: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, Price::from_cents(599).unwrap());

    platform.delete_plan(created.id).await.unwrap();
    let missing = platform.update_plan(created.id, NewPlan {
        name: "Student".to_owned(),
        description: "Discounted access".to_owned(),
        price: Price::from_cents(599).unwrap(),
        duration_days: 30,
        features: vec![],
        is_active: true,
    })
    .await
    .unwrap_err();
    assert!(matches!(missing, CatalogError::PlanNotFound(_)));
}
