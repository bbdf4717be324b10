//! CLI command implementations.

pub mod account;
pub mod seed;
pub mod stats;
