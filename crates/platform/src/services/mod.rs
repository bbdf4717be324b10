//! Platform services.
//!
//! - [`auth`] - registration, login, logout
//! - [`catalog`] - plan catalog and subscription ledger
//! - [`notifications`] - append-only notification log

pub mod auth;
pub mod catalog;
pub mod notifications;

pub use auth::{AuthError, AuthLatency, AuthService};
pub use catalog::{CatalogError, CatalogService};
pub use notifications::NotificationLog;
