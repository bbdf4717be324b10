//! Account management commands.

use tracing::info;

use subsflow_core::Role;
use subsflow_platform::Platform;
use subsflow_platform::error::PlatformError;

/// Register a new account.
///
/// Runs the full sign-up flow, so the new account also gets its
/// welcome notification and (when a data dir is configured) a
/// persisted session.
///
/// # Errors
///
/// Returns an error if the email is malformed, a required field is
/// empty, or the email is already registered.
pub async fn create(
    platform: &Platform,
    email: &str,
    name: &str,
    credential: &str,
    role: Role,
) -> Result<(), PlatformError> {
    let account = platform.sign_up(email, credential, name, role).await?;

    info!(
        account_id = %account.id,
        email = %account.email,
        role = %account.role,
        "account created"
    );
    Ok(())
}
