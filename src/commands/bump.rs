//! Bump command: changelog → config artifact synchronization

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::release::ReleaseSynchronizer;
use std::env;

pub fn run_bump() -> ReleaseResult<()> {
  let root = env::current_dir()?;
  let config = ReleaseConfig::load(&root)?;

  println!("🔄 Updating version from {}", config.paths.changelog.display());
  let outcome = ReleaseSynchronizer::new(&root, &config).synchronize()?;
  println!(
    "✅ Version {} written to {}",
    outcome.version,
    config.paths.artifact.display()
  );

  Ok(())
}
