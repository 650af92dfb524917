//! Core building blocks shared by all kite-release operations:
//!
//! - **command**: external command execution with failure classification
//! - **config**: release.toml parsing and defaults
//! - **error**: error types with contextual help messages
//! - **vcs**: git operations over the system git binary

pub mod command;
pub mod config;
pub mod error;
pub mod vcs;
