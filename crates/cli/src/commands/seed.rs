//! Seed demo data.
//!
//! Creates the demo accounts (admin@example.com, user@example.com)
//! and the three standard plans, then reports the resulting stats.
//! Safe to re-run: existing accounts are skipped.

use tracing::info;

use subsflow_platform::Platform;
use subsflow_platform::error::PlatformError;

/// Seed demo accounts and plans.
///
/// # Errors
///
/// Returns an error if seeding or a stats read fails.
pub async fn run(platform: &Platform) -> Result<(), PlatformError> {
    platform.seed_demo_data().await?;

    let stats = platform.stats().await;
    info!(
        total_users = stats.total_users,
        plans = platform.plans().await.len(),
        "demo data seeded"
    );
    Ok(())
}
