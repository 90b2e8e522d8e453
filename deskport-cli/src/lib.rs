//! # Deskport CLI Library
//!
//! Command definitions and the two export pipelines behind the `deskport`
//! binary.

pub mod cli;
pub mod clients;
