//! Integration tests for the bump command

use crate::helpers::{TestRepo, run_kite, ARTIFACT};
use anyhow::Result;

#[test]
fn test_bump_syncs_artifact_to_latest_changelog_version() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_kite(&repo.path, &["bump"])?;
  assert!(output.status.success(), "bump failed: {}", String::from_utf8_lossy(&output.stderr));

  let artifact = repo.read_file("include/core/config.h")?;
  assert!(artifact.contains("#define VERSION_MAJOR 2"));
  assert!(artifact.contains("#define VERSION_MINOR 0"));
  assert!(artifact.contains("#define VERSION_PATCH 0"));
  assert!(artifact.contains("#define VERSION_BUILD 5"));
  assert!(artifact.contains("#define VERSION_STRING \"v2.0.0.5\""));

  let today = chrono::Local::now().format("%d/%m/%Y").to_string();
  assert!(artifact.contains(&format!("#define BUILD_DATE \"{}\"", today)));

  // Lines outside the version macros survive untouched
  assert!(artifact.starts_with("// Generated - do not edit\n"));
  Ok(())
}

#[test]
fn test_bump_without_version_token_fails_and_leaves_artifact_untouched() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("docs/changelog.md", "# Changelog\n\nNothing released yet.\n")?;

  let output = run_kite(&repo.path, &["bump"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No version"), "unexpected stderr: {}", stderr);

  assert_eq!(repo.read_file("include/core/config.h")?, ARTIFACT);
  Ok(())
}

#[test]
fn test_bump_with_missing_artifact_fails() -> Result<()> {
  let repo = TestRepo::new()?;
  std::fs::remove_file(repo.path.join("include/core/config.h"))?;

  let output = run_kite(&repo.path, &["bump"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_bump_respects_release_toml_paths() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file(
    "release.toml",
    "[paths]\nchangelog = \"CHANGES.md\"\nartifact = \"firmware/version.h\"\n",
  )?;
  repo.write_file("CHANGES.md", "## 2024-02-01\n\n### Alt path release (v3.1.0.7)\n")?;
  repo.write_file("firmware/version.h", ARTIFACT)?;

  let output = run_kite(&repo.path, &["bump"])?;
  assert!(output.status.success(), "bump failed: {}", String::from_utf8_lossy(&output.stderr));

  let artifact = repo.read_file("firmware/version.h")?;
  assert!(artifact.contains("#define VERSION_STRING \"v3.1.0.7\""));

  // The default artifact location must not have been rewritten
  assert_eq!(repo.read_file("include/core/config.h")?, ARTIFACT);
  Ok(())
}
