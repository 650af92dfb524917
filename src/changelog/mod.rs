//! Changelog document scanning
//!
//! Read-only extraction of the latest version token and the most recent
//! structured change entry. The document itself is never modified.

pub mod parser;

pub use parser::{ChangeEntry, ChangelogParser, Version};
