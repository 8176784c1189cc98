//! Test utilities shared across the opjira workspace
//!
//! This crate provides common testing infrastructure including:
//! - environment variable isolation ([`EnvVarGuard`])
//! - a fake 1Password CLI executable ([`FakeOpGuard`], unix only)
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
#[cfg(unix)]
pub mod op;

// Re-export commonly used items
pub use env::EnvVarGuard;
#[cfg(unix)]
pub use op::{FakeOpGuard, item_json};
