//! End-to-end backup workflow as an explicit state machine
//!
//! `CheckRepo → Synchronize → DetectChanges → StageAll → BuildMessage →
//! Commit → Push → Done`, linear with early exit: any stage failure stops
//! the run, and a clean working tree short-circuits to the distinct
//! nothing-to-do outcome without staging, committing or pushing. There are
//! no retries anywhere in the pipeline.
//!
//! Fully synchronous: each stage blocks on its external command before the
//! next one starts, and no timeout is enforced. A single orchestrator
//! instance is assumed per repository; concurrent runs against the same
//! working tree are out of contract.

use crate::changelog::ChangeEntry;
use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::core::vcs::SystemGit;
use crate::release::{ReleaseSynchronizer, SyncOutcome};
use chrono::{DateTime, Local, NaiveDate};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the final push lands
#[derive(Debug, Clone)]
pub enum PushTarget {
  /// `git push` to the currently tracked upstream
  Upstream,
  /// `git push <remote> <branch>`
  Explicit { remote: String, branch: String },
}

/// How the commit message is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStyle {
  /// Bump the version first; the message carries version + change entry
  Versioned,
  /// Skip the version bump; the message is a plain timestamped marker
  Snapshot,
}

/// Terminal outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
  /// Changes were staged, committed and pushed
  Committed { version: Option<String> },
  /// The working tree was already clean; nothing was staged, committed
  /// or pushed
  NothingToDo,
}

/// Named states of the workflow; each carries what the next transition needs
enum Stage {
  CheckRepo,
  Synchronize(SystemGit),
  DetectChanges(SystemGit, Option<SyncOutcome>),
  StageAll(SystemGit, Option<SyncOutcome>),
  BuildMessage(SystemGit, Option<SyncOutcome>),
  Commit(SystemGit, String, Option<String>),
  Push(SystemGit, Option<String>),
  Done(BackupOutcome),
}

/// Drives the backup workflow against one repository
pub struct BackupOrchestrator {
  root: PathBuf,
  config: ReleaseConfig,
  style: CommitStyle,
  target: PushTarget,
}

impl BackupOrchestrator {
  pub fn new(root: &Path, config: ReleaseConfig, style: CommitStyle, target: PushTarget) -> Self {
    Self {
      root: root.to_path_buf(),
      config,
      style,
      target,
    }
  }

  /// Run the state machine to completion or first failure.
  pub fn run(&self) -> ReleaseResult<BackupOutcome> {
    let mut stage = Stage::CheckRepo;
    loop {
      stage = match stage {
        Stage::CheckRepo => self.check_repo()?,
        Stage::Synchronize(git) => self.synchronize(git)?,
        Stage::DetectChanges(git, sync) => self.detect_changes(git, sync)?,
        Stage::StageAll(git, sync) => self.stage_all(git, sync)?,
        Stage::BuildMessage(git, sync) => self.build_message(git, sync)?,
        Stage::Commit(git, message, version) => self.commit(git, message, version)?,
        Stage::Push(git, version) => self.push(git, version)?,
        Stage::Done(outcome) => return Ok(outcome),
      };
    }
  }

  fn check_repo(&self) -> ReleaseResult<Stage> {
    let git = SystemGit::open(&self.root)?;
    println!("📁 Repository: {}", git.work_tree().display());

    Ok(match self.style {
      CommitStyle::Versioned => Stage::Synchronize(git),
      CommitStyle::Snapshot => Stage::DetectChanges(git, None),
    })
  }

  fn synchronize(&self, git: SystemGit) -> ReleaseResult<Stage> {
    println!("🔄 Updating version from {}", self.config.paths.changelog.display());
    let sync = ReleaseSynchronizer::new(git.work_tree(), &self.config).synchronize()?;
    println!("   Version {}", sync.version);
    Ok(Stage::DetectChanges(git, Some(sync)))
  }

  fn detect_changes(&self, git: SystemGit, sync: Option<SyncOutcome>) -> ReleaseResult<Stage> {
    if !git.has_pending_changes()? {
      println!("✨ Working tree clean; nothing to commit");
      return Ok(Stage::Done(BackupOutcome::NothingToDo));
    }
    println!("📝 Changes detected");
    Ok(Stage::StageAll(git, sync))
  }

  fn stage_all(&self, git: SystemGit, sync: Option<SyncOutcome>) -> ReleaseResult<Stage> {
    git.stage_all()?;
    println!("   Staged all changes");
    Ok(Stage::BuildMessage(git, sync))
  }

  fn build_message(&self, git: SystemGit, sync: Option<SyncOutcome>) -> ReleaseResult<Stage> {
    let (message, version) = match sync {
      Some(sync) => {
        let version = sync.version.to_string();
        let message = versioned_message(&version, &sync.change, Local::now().date_naive());
        (message, Some(version))
      }
      None => (snapshot_message(Local::now()), None),
    };
    Ok(Stage::Commit(git, message, version))
  }

  fn commit(&self, git: SystemGit, message: String, version: Option<String>) -> ReleaseResult<Stage> {
    // Scoped side-channel for the multi-line message: the file is removed
    // on drop whether or not the commit succeeds.
    let mut msg_file = NamedTempFile::new().context("Failed to create commit message file")?;
    msg_file
      .write_all(message.as_bytes())
      .context("Failed to write commit message file")?;
    msg_file.flush().context("Failed to flush commit message file")?;

    git.commit_from_file(msg_file.path())?;
    println!("   Created commit");
    Ok(Stage::Push(git, version))
  }

  fn push(&self, git: SystemGit, version: Option<String>) -> ReleaseResult<Stage> {
    match &self.target {
      PushTarget::Explicit { remote, branch } => {
        println!("🚀 Pushing to {}/{}", remote, branch);
        git.push(remote, branch)?;
      }
      PushTarget::Upstream => {
        println!("🚀 Pushing to tracked upstream");
        git.push_upstream()?;
      }
    }
    Ok(Stage::Done(BackupOutcome::Committed { version }))
  }
}

/// First line `Version {version} - {ISO date}`, blank line, change entry.
pub fn versioned_message(version: &str, change: &ChangeEntry, date: NaiveDate) -> String {
  format!("Version {} - {}\n\n{}", version, date.format("%Y-%m-%d"), change.render())
}

/// Plain timestamped marker for the snapshot variant.
pub fn snapshot_message(now: DateTime<Local>) -> String {
  format!("Automated backup {}", now.format("%Y-%m-%d %H:%M:%S"))
}
