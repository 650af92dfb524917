//! Backup command: versioned stage → commit → push to an explicit remote

use crate::backup::{BackupOrchestrator, BackupOutcome, CommitStyle, PushTarget};
use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use std::env;

pub fn run_backup(remote: Option<String>, branch: Option<String>) -> ReleaseResult<()> {
  let root = env::current_dir()?;
  let config = ReleaseConfig::load(&root)?;

  // CLI flags win over release.toml, which wins over origin/main.
  let target = PushTarget::Explicit {
    remote: remote.unwrap_or_else(|| config.git.remote.clone()),
    branch: branch.unwrap_or_else(|| config.git.branch.clone()),
  };

  let orchestrator = BackupOrchestrator::new(&root, config, CommitStyle::Versioned, target);
  match orchestrator.run()? {
    BackupOutcome::Committed { version } => {
      println!();
      match version {
        Some(version) => println!("✅ Backup completed; version {} saved", version),
        None => println!("✅ Backup completed"),
      }
    }
    BackupOutcome::NothingToDo => {
      println!();
      println!("✅ Nothing to back up; repository is up to date");
    }
  }

  Ok(())
}
