//! Print aggregate platform stats.

use tracing::info;

use subsflow_platform::Platform;
use subsflow_platform::error::PlatformError;

/// Print the platform's aggregate metrics.
///
/// Restores any persisted session first (seeding demo data when
/// `SUBSFLOW_SEED_DEMO_DATA` is set), so the numbers reflect the
/// configured startup state.
///
/// # Errors
///
/// Returns an error if seeding or a stats read fails.
pub async fn run(platform: &Platform) -> Result<(), PlatformError> {
    let state = platform.restore_session().await?;
    let stats = platform.stats().await;

    let signed_in = state
        .account_id()
        .map_or_else(|| "none".to_owned(), |id| id.to_string());

    info!(
        total_users = stats.total_users,
        active_subscriptions = stats.active_subscriptions,
        recurring_revenue = %stats.recurring_revenue,
        signed_in = %signed_in,
        "platform stats"
    );
    Ok(())
}
