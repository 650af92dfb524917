//! Quick command: timestamped snapshot pushed to the tracked upstream

use crate::backup::{BackupOrchestrator, BackupOutcome, CommitStyle, PushTarget};
use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use std::env;

pub fn run_quick() -> ReleaseResult<()> {
  let root = env::current_dir()?;
  let config = ReleaseConfig::load(&root)?;

  let orchestrator =
    BackupOrchestrator::new(&root, config, CommitStyle::Snapshot, PushTarget::Upstream);
  match orchestrator.run()? {
    BackupOutcome::Committed { .. } => {
      println!();
      println!("✅ Snapshot saved");
    }
    BackupOutcome::NothingToDo => {
      println!();
      println!("✅ Nothing to snapshot; repository is up to date");
    }
  }

  Ok(())
}
