//! Git backend using system git (zero crate dependencies)
//!
//! Every operation shells out through [`CommandRunner`] so failures carry
//! the captured stderr and are classified: a missing git binary surfaces as
//! `CommandError::NotFound`, a failed git command as the matching
//! `GitError` stage variant.

use crate::core::command::{CommandResult, CommandRunner};
use crate::core::error::{GitError, ReleaseError, ReleaseResult};
use std::path::{Path, PathBuf};

/// Handle on the repository working tree containing `path`
#[derive(Debug)]
pub struct SystemGit {
  runner: CommandRunner,
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open the repository containing `path`.
  ///
  /// Checks the prerequisite first (`git --version`) so a missing binary is
  /// reported as "git not installed" rather than a repository error, then
  /// resolves the working-tree root.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let runner = CommandRunner::new(path);
    runner.run_checked("git", &["--version"])?;

    let toplevel = runner.run("git", &["rev-parse", "--show-toplevel"])?;
    if !toplevel.succeeded {
      return Err(ReleaseError::Git(GitError::NotARepository {
        path: path.to_path_buf(),
      }));
    }

    Ok(Self {
      runner,
      work_tree: PathBuf::from(&toplevel.stdout),
    })
  }

  /// Working tree root
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Pending changes in porcelain format; an empty string means a clean tree.
  pub fn status_porcelain(&self) -> ReleaseResult<String> {
    let result = self.runner.run("git", &["status", "--porcelain"])?;
    if !result.succeeded {
      return Err(ReleaseError::message(format!(
        "git status --porcelain failed: {}",
        result.stderr.trim_end()
      )));
    }
    Ok(result.stdout)
  }

  /// Whether the working tree has anything to commit
  pub fn has_pending_changes(&self) -> ReleaseResult<bool> {
    Ok(!self.status_porcelain()?.trim().is_empty())
  }

  /// Stage every modified, new and deleted path.
  pub fn stage_all(&self) -> ReleaseResult<()> {
    let result = self.runner.run("git", &["add", "."])?;
    if !result.succeeded {
      return Err(ReleaseError::Git(GitError::StageFailed {
        stderr: diagnostic_output(&result),
      }));
    }
    Ok(())
  }

  /// Commit with a message read from `message_file` (`git commit -F`).
  ///
  /// The file form preserves multi-line messages and special characters
  /// that would be mangled on a command line.
  pub fn commit_from_file(&self, message_file: &Path) -> ReleaseResult<()> {
    let file = message_file.to_string_lossy();
    let result = self.runner.run("git", &["commit", "-F", &file])?;
    if !result.succeeded {
      return Err(ReleaseError::Git(GitError::CommitFailed {
        stderr: diagnostic_output(&result),
      }));
    }
    Ok(())
  }

  /// Push to an explicit remote and branch.
  pub fn push(&self, remote: &str, branch: &str) -> ReleaseResult<()> {
    let result = self.runner.run("git", &["push", remote, branch])?;
    if !result.succeeded {
      return Err(ReleaseError::Git(GitError::PushFailed {
        target: format!("{}/{}", remote, branch),
        reason: diagnostic_output(&result),
      }));
    }
    Ok(())
  }

  /// Push to the currently tracked upstream.
  pub fn push_upstream(&self) -> ReleaseResult<()> {
    let result = self.runner.run("git", &["push"])?;
    if !result.succeeded {
      return Err(ReleaseError::Git(GitError::PushFailed {
        target: "tracked upstream".to_string(),
        reason: diagnostic_output(&result),
      }));
    }
    Ok(())
  }
}

/// Prefer stderr, fall back to stdout; git writes hook and identity
/// complaints to either stream depending on the failure.
fn diagnostic_output(result: &CommandResult) -> String {
  if !result.stderr.trim().is_empty() {
    result.stderr.clone()
  } else {
    result.stdout.clone()
  }
}
