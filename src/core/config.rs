//! release.toml configuration
//!
//! One explicit structure instead of module-level path constants: the
//! changelog path, the generated artifact path and the default push target
//! all come from here. Every field has a default, so a missing release.toml
//! is not an error.

use crate::core::error::{ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file at the repository root
pub const CONFIG_FILE: &str = "release.toml";

/// Configuration for kite-release
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub paths: PathsConfig,
  #[serde(default)]
  pub git: GitConfig,
}

/// Input/output file locations, relative to the repository root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
  /// Changelog document (default: docs/changelog.md)
  #[serde(default = "default_changelog")]
  pub changelog: PathBuf,

  /// Generated config header to patch (default: include/core/config.h)
  #[serde(default = "default_artifact")]
  pub artifact: PathBuf,
}

/// Default push target for the versioned backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
  /// Remote name (default: origin)
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Branch name (default: main)
  #[serde(default = "default_branch")]
  pub branch: String,
}

fn default_changelog() -> PathBuf {
  PathBuf::from("docs/changelog.md")
}

fn default_artifact() -> PathBuf {
  PathBuf::from("include/core/config.h")
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_branch() -> String {
  "main".to_string()
}

impl Default for PathsConfig {
  fn default() -> Self {
    Self {
      changelog: default_changelog(),
      artifact: default_artifact(),
    }
  }
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
      branch: default_branch(),
    }
  }
}

impl ReleaseConfig {
  /// Load release.toml from `root`, falling back to defaults when absent.
  pub fn load(root: &Path) -> ReleaseResult<Self> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content)?;
    Ok(config)
  }
}
