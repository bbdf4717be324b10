//! Platform configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SUBSFLOW_DATA_DIR` - Directory for file-backed durable storage
//!   (default: in-memory storage, state lost on exit)
//! - `SUBSFLOW_API_LATENCY_MS` - Simulated latency for sign-up/sign-in
//!   (default: 500)
//! - `SUBSFLOW_PROFILE_LATENCY_MS` - Simulated latency for the profile
//!   fetch during session restore (default: 300)
//! - `SUBSFLOW_SIGN_OUT_LATENCY_MS` - Simulated latency for sign-out
//!   (default: 200)
//! - `SUBSFLOW_SEED_DEMO_DATA` - Seed demo accounts and plans at
//!   startup when `true`/`1` (default: false)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_API_LATENCY_MS: u64 = 500;
const DEFAULT_PROFILE_LATENCY_MS: u64 = 300;
const DEFAULT_SIGN_OUT_LATENCY_MS: u64 = 200;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Platform configuration.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Directory for file-backed storage; `None` keeps state in memory.
    pub data_dir: Option<PathBuf>,
    /// Simulated latency for sign-up and sign-in.
    pub api_latency: Duration,
    /// Simulated latency for the profile fetch during session restore.
    pub profile_latency: Duration,
    /// Simulated latency for sign-out.
    pub sign_out_latency: Duration,
    /// Whether to seed demo accounts and plans at startup.
    pub seed_demo_data: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            api_latency: Duration::from_millis(DEFAULT_API_LATENCY_MS),
            profile_latency: Duration::from_millis(DEFAULT_PROFILE_LATENCY_MS),
            sign_out_latency: Duration::from_millis(DEFAULT_SIGN_OUT_LATENCY_MS),
            seed_demo_data: false,
        }
    }
}

impl PlatformConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a latency variable is
    /// not a non-negative integer or the seed flag is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var("SUBSFLOW_DATA_DIR").ok().map(PathBuf::from);

        let api_latency = latency_from_env("SUBSFLOW_API_LATENCY_MS", DEFAULT_API_LATENCY_MS)?;
        let profile_latency =
            latency_from_env("SUBSFLOW_PROFILE_LATENCY_MS", DEFAULT_PROFILE_LATENCY_MS)?;
        let sign_out_latency =
            latency_from_env("SUBSFLOW_SIGN_OUT_LATENCY_MS", DEFAULT_SIGN_OUT_LATENCY_MS)?;

        let seed_demo_data = match std::env::var("SUBSFLOW_SEED_DEMO_DATA") {
            Ok(raw) => match raw.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ConfigError::InvalidEnvVar(
                        "SUBSFLOW_SEED_DEMO_DATA".to_owned(),
                        format!("expected a boolean, got {other:?}"),
                    ));
                }
            },
            Err(_) => false,
        };

        Ok(Self {
            data_dir,
            api_latency,
            profile_latency,
            sign_out_latency,
            seed_demo_data,
        })
    }

    /// A configuration with all simulated latencies at zero.
    ///
    /// For tests and management tooling, where waiting out demo delays
    /// is pure cost.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            api_latency: Duration::ZERO,
            profile_latency: Duration::ZERO,
            sign_out_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn latency_from_env(name: &str, default_ms: u64) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlatformConfig::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.api_latency, Duration::from_millis(500));
        assert_eq!(config.profile_latency, Duration::from_millis(300));
        assert_eq!(config.sign_out_latency, Duration::from_millis(200));
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_instant_zeroes_latencies() {
        let config = PlatformConfig::instant();
        assert_eq!(config.api_latency, Duration::ZERO);
        assert_eq!(config.profile_latency, Duration::ZERO);
        assert_eq!(config.sign_out_latency, Duration::ZERO);
    }
}
