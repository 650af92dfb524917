//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Default changelog fixture: latest entry v2.0.0.5, previous v1.9.0.2
pub const CHANGELOG: &str = "\
# Changelog

## 2024-01-01

### Autopilot gain tuning (v2.0.0.5)
- **Category**: Flight control
- **Action**:
  - Retuned PID gains for the line servo
    across the whole wind envelope

## 2023-12-20

### Sensor fusion fixes (v1.9.0.2)
- **Category**: Sensors
- **Action**:
  - Fixed IMU drift compensation
";

/// Default artifact fixture, one version behind the changelog
pub const ARTIFACT: &str = "\
// Generated - do not edit
#define VERSION_MAJOR 1
#define VERSION_MINOR 0
#define VERSION_PATCH 0
#define VERSION_BUILD 3
#define VERSION_STRING \"v1.0.0.3\"
#define BUILD_DATE \"01/01/2020\"
";

/// Artifact already synchronized with the changelog, dated today, so a
/// version bump rewrites it to identical content
pub fn artifact_synced_today() -> String {
  format!(
    "// Generated - do not edit\n\
     #define VERSION_MAJOR 2\n\
     #define VERSION_MINOR 0\n\
     #define VERSION_PATCH 0\n\
     #define VERSION_BUILD 5\n\
     #define VERSION_STRING \"v2.0.0.5\"\n\
     #define BUILD_DATE \"{}\"\n",
    chrono::Local::now().format("%d/%m/%Y")
  )
}

/// A firmware repository with changelog + config artifact fixtures
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  remote: Option<TempDir>,
}

impl TestRepo {
  /// Create a repo with the default fixtures committed
  pub fn new() -> Result<Self> {
    Self::with_artifact(ARTIFACT)
  }

  /// Create a repo with a custom config artifact committed
  pub fn with_artifact(artifact: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    let repo = Self {
      _root: root,
      path,
      remote: None,
    };
    repo.write_file("docs/changelog.md", CHANGELOG)?;
    repo.write_file("include/core/config.h", artifact)?;
    repo.commit_all("Initial firmware import")?;

    Ok(repo)
  }

  /// Add a bare repository as the `origin` remote
  pub fn add_origin(&mut self) -> Result<()> {
    let remote = TempDir::new()?;
    git(remote.path(), &["init", "--bare", "--initial-branch=main"])?;
    let url = remote.path().to_string_lossy().to_string();
    git(&self.path, &["remote", "add", "origin", &url])?;
    self.remote = Some(remote);
    Ok(())
  }

  /// Push the current branch to origin and set it as upstream
  pub fn push_baseline(&self) -> Result<()> {
    git(&self.path, &["push", "-u", "origin", "main"])?;
    Ok(())
  }

  /// Write a file relative to the repo root, creating parent directories
  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(rel);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Read a file relative to the repo root
  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  /// Stage and commit everything
  pub fn commit_all(&self, message: &str) -> Result<()> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  /// Full message of the latest commit
  pub fn last_message(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%B"])?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }

  /// Number of commits on HEAD
  pub fn commit_count(&self) -> Result<usize> {
    let output = git(&self.path, &["rev-list", "--count", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().parse()?)
  }

  /// Number of commits visible in the bare origin repository
  pub fn remote_commit_count(&self) -> Result<usize> {
    let remote = self.remote.as_ref().context("no origin configured")?;
    let output = Command::new("git")
      .current_dir(remote.path())
      .args(["rev-list", "--count", "--all"])
      .output()?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().parse().unwrap_or(0))
  }

  /// Install a pre-commit hook that rejects every commit
  pub fn install_failing_pre_commit(&self) -> Result<()> {
    let hook = self.path.join(".git/hooks/pre-commit");
    std::fs::write(&hook, "#!/bin/sh\nexit 1\n")?;
    std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
  }
}

/// Run git in a directory, failing the test on a non-zero exit
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the kite-release binary; callers assert on the exit status, so a
/// non-zero exit is returned, not an error
pub fn run_kite(cwd: &Path, args: &[&str]) -> Result<Output> {
  run_kite_env(cwd, args, &[])
}

/// Run the kite-release binary with extra environment variables set
pub fn run_kite_env(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_kite-release");

  let mut cmd = Command::new(bin);
  cmd.current_dir(cwd).args(args);
  for (key, value) in envs {
    cmd.env(key, value);
  }
  cmd.output().context("Failed to run kite-release")
}
