//! One-shot version bump from the changelog into the config artifact

use crate::artifact::ConfigPatcher;
use crate::changelog::{ChangeEntry, ChangelogParser, Version};
use crate::core::config::ReleaseConfig;
use crate::core::error::{ArtifactError, ReleaseError, ReleaseResult, ResultExt, VersionError};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a synchronization run, consumed by commit-message assembly
#[derive(Debug, Clone)]
pub struct SyncOutcome {
  pub version: Version,
  pub change: ChangeEntry,
}

/// Composes the changelog parser and the config patcher into one
/// "bump version" operation
pub struct ReleaseSynchronizer {
  changelog_path: PathBuf,
  artifact_path: PathBuf,
}

impl ReleaseSynchronizer {
  pub fn new(root: &Path, config: &ReleaseConfig) -> Self {
    Self {
      changelog_path: root.join(&config.paths.changelog),
      artifact_path: root.join(&config.paths.artifact),
    }
  }

  /// Synchronize using today's local date as the build date.
  pub fn synchronize(&self) -> ReleaseResult<SyncOutcome> {
    self.synchronize_at(Local::now().date_naive())
  }

  /// Extract the latest version and change entry, then rewrite the artifact.
  ///
  /// Fails with `NoVersionFound` before touching the artifact when the
  /// changelog yields no version token. The artifact is written back in a
  /// single pass; the two files are not updated transactionally.
  pub fn synchronize_at(&self, build_date: NaiveDate) -> ReleaseResult<SyncOutcome> {
    let parser = ChangelogParser::new()?;
    let document = fs::read_to_string(&self.changelog_path)
      .with_context(|| format!("Failed to read changelog {}", self.changelog_path.display()))?;

    let version = parser.latest_version(&document).ok_or_else(|| {
      ReleaseError::Version(VersionError::NoVersionFound {
        changelog: self.changelog_path.clone(),
      })
    })?;
    let change = parser.latest_change(&document);

    if !self.artifact_path.exists() {
      return Err(ReleaseError::Artifact(ArtifactError::Missing {
        path: self.artifact_path.clone(),
      }));
    }
    let artifact = fs::read_to_string(&self.artifact_path)
      .with_context(|| format!("Failed to read {}", self.artifact_path.display()))?;

    let patched = ConfigPatcher::new()?.apply(&artifact, &version, build_date)?;
    fs::write(&self.artifact_path, patched)
      .with_context(|| format!("Failed to write {}", self.artifact_path.display()))?;

    Ok(SyncOutcome { version, change })
  }
}
