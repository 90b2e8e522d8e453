//! Test utilities shared across the deskport workspace
//!
//! This crate provides common testing infrastructure including:
//! - `.netrc` fixtures ([`NetrcGuard`])
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Jira payload builders ([`jira`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod jira;
pub mod netrc;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use netrc::NetrcGuard;
