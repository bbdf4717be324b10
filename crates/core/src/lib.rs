//! SubsFlow Core - Shared types library.
//!
//! This crate provides common types used across all SubsFlow components:
//! - `platform` - Account/session/subscription state manager
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no async runtime. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails,
//!   credentials, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
