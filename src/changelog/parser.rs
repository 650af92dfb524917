//! Regex-driven changelog extraction
//!
//! The changelog is a markdown-like document of dated blocks, newest first:
//!
//! ```text
//! ## 2024-01-01
//!
//! ### Autopilot gain tuning (v2.0.0.5)
//! - **Category**: Flight control
//! - **Action**:
//!   - Retuned PID gains for the line servo
//!     across the whole wind envelope
//! ```
//!
//! Version tokens of the form `vMAJOR.MINOR.PATCH.BUILD` may appear
//! anywhere in the text.

use crate::core::error::ReleaseResult;
use regex::Regex;
use std::fmt;

/// Four-part firmware version
///
/// Rendered canonically as `vMAJOR.MINOR.PATCH.BUILD`. All four components
/// are required; there is no implicit defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
  pub major: u64,
  pub minor: u64,
  pub patch: u64,
  pub build: u64,
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "v{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
  }
}

/// Rendered in place of an entry when the changelog has no structured block
pub const NO_CHANGES_SENTINEL: &str = "No changes detailed";

/// The most recent structured changelog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
  pub title: String,
  pub category: String,
  /// Re-indented action body lines, in document order
  pub actions: Vec<String>,
}

impl ChangeEntry {
  /// Sentinel entry used when no structured block matches
  pub fn sentinel() -> Self {
    Self {
      title: NO_CHANGES_SENTINEL.to_string(),
      category: String::new(),
      actions: Vec::new(),
    }
  }

  pub fn is_sentinel(&self) -> bool {
    self.category.is_empty() && self.actions.is_empty() && self.title == NO_CHANGES_SENTINEL
  }

  /// Render for inclusion in a commit message.
  pub fn render(&self) -> String {
    if self.is_sentinel() {
      return NO_CHANGES_SENTINEL.to_string();
    }

    let mut out = String::new();
    out.push_str(&self.title);
    out.push('\n');
    out.push_str("Category: ");
    out.push_str(&self.category);
    for line in &self.actions {
      out.push('\n');
      out.push_str(line);
    }
    out
  }
}

/// Read-only scanner for changelog documents
pub struct ChangelogParser {
  version_re: Regex,
  entry_re: Regex,
}

impl ChangelogParser {
  pub fn new() -> ReleaseResult<Self> {
    Ok(Self {
      version_re: Regex::new(r"v(\d+)\.(\d+)\.(\d+)\.(\d+)")?,
      // A level-2 date heading, then the first level-3 entry with its
      // Category and Action fields. The action body runs until the next
      // heading (entry or date) or end of input.
      entry_re: Regex::new(
        r"(?s)## [^\n]+\n\n### ([^\n]+)\n- \*\*Category\*\*: ([^\n]+)\n- \*\*Action\*\*:(.*?)(?:\n\n##|\z)",
      )?,
    })
  }

  /// First version token in document order.
  ///
  /// The document is conventionally newest-entry-first, so the first match
  /// is taken as the latest version. The ordering is assumed, not validated
  /// against entry dates.
  pub fn latest_version(&self, document: &str) -> Option<Version> {
    let caps = self.version_re.captures(document)?;
    Some(Version {
      major: caps[1].parse().ok()?,
      minor: caps[2].parse().ok()?,
      patch: caps[3].parse().ok()?,
      build: caps[4].parse().ok()?,
    })
  }

  /// Most recent structured entry, or the sentinel when none matches.
  pub fn latest_change(&self, document: &str) -> ChangeEntry {
    self.find_entry(document).unwrap_or_else(ChangeEntry::sentinel)
  }

  fn find_entry(&self, document: &str) -> Option<ChangeEntry> {
    let caps = self.entry_re.captures(document)?;
    let body = caps.get(3)?.as_str();
    Some(ChangeEntry {
      title: caps[1].trim().to_string(),
      category: caps[2].trim().to_string(),
      actions: reindent_actions(body),
    })
  }
}

/// Normalize the action-body indentation: bullet lines get two spaces,
/// continuation lines four.
fn reindent_actions(body: &str) -> Vec<String> {
  body
    .trim()
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(|line| {
      if line.starts_with('-') {
        format!("  {}", line)
      } else {
        format!("    {}", line)
      }
    })
    .collect()
}
