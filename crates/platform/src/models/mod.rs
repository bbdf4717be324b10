//! Domain types for the platform.
//!
//! These types represent validated domain objects, separate from the
//! durable record shapes in [`crate::storage`].

pub mod account;
pub mod notification;
pub mod plan;
pub mod session;
pub mod subscription;

pub use account::Account;
pub use notification::Notification;
pub use plan::{NewPlan, Plan};
pub use session::{CurrentUser, SessionRecord};
pub use subscription::Subscription;
