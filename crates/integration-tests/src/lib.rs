//! Integration tests for SubsFlow.
//!
//! Scenario tests run against the in-process [`subsflow_platform::Platform`]
//! facade - there is no server to stand up, so the whole suite runs
//! under plain `cargo test`.
//!
//! # Test Categories
//!
//! - `auth_flow` - registration, login, welcome notifications
//! - `session_persistence` - durable session round-trips and corruption
//! - `catalog_ledger` - plan CRUD, subscriptions, revenue snapshots
//!
//! Shared fixtures live here.

use std::sync::Arc;

use subsflow_platform::Platform;
use subsflow_platform::config::PlatformConfig;
use subsflow_platform::storage::{MemoryStorage, Storage};

/// A platform with zero simulated latency and demo data seeded on
/// restore, over its own in-memory storage.
#[must_use]
pub fn demo_platform() -> Platform {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    demo_platform_over(storage)
}

/// A demo platform over the given storage.
///
/// Handing the same storage to a second platform simulates a process
/// restart that keeps the durable records.
#[must_use]
pub fn demo_platform_over(storage: Arc<dyn Storage>) -> Platform {
    let config = PlatformConfig {
        seed_demo_data: true,
        ..PlatformConfig::instant()
    };
    Platform::with_storage(config, storage)
}
