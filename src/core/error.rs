//! Error types for kite-release with contextual messages
//!
//! This module provides a unified error type that categorizes failures and
//! attaches a remediation hint where one exists. Fatal errors are printed
//! through [`print_error`] and always terminate the run with exit code 1;
//! the exit code is the only machine-readable success signal.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for kite-release
#[derive(Debug)]
pub enum ReleaseError {
  /// External command execution errors
  Command(CommandError),

  /// Git workflow errors
  Git(GitError),

  /// Changelog version extraction errors
  Version(VersionError),

  /// Config artifact errors
  Artifact(ArtifactError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: format!("{}: {}", ctx_str, err),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Command(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Version(e) => e.help_message(),
      ReleaseError::Artifact(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Command(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Artifact(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<regex::Error> for ReleaseError {
  fn from(err: regex::Error) -> Self {
    ReleaseError::message(format!("Regex error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

/// External command execution errors
#[derive(Debug)]
pub enum CommandError {
  /// The program itself could not be found on PATH
  NotFound { program: String },

  /// The command ran and exited non-zero (strict variant only)
  Failed {
    command: String,
    exit_code: i32,
    stdout: String,
    stderr: String,
  },
}

impl CommandError {
  fn help_message(&self) -> Option<String> {
    match self {
      CommandError::NotFound { program } => Some(format!(
        "Make sure '{}' is installed and reachable through PATH.",
        program
      )),
      CommandError::Failed { .. } => None,
    }
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandError::NotFound { program } => {
        write!(f, "Command not found: {}", program)
      }
      CommandError::Failed {
        command,
        exit_code,
        stdout,
        stderr,
      } => {
        write!(f, "Command failed (exit code {}): {}", exit_code, command)?;
        if !stderr.trim().is_empty() {
          write!(f, "\n{}", stderr.trim_end())?;
        }
        if !stdout.trim().is_empty() {
          write!(f, "\n{}", stdout.trim_end())?;
        }
        Ok(())
      }
    }
  }
}

/// Git workflow errors, one variant per fatal backup stage
#[derive(Debug)]
pub enum GitError {
  /// The working directory is not under version control
  NotARepository { path: PathBuf },

  /// `git add .` failed
  StageFailed { stderr: String },

  /// `git commit` failed
  CommitFailed { stderr: String },

  /// `git push` failed
  PushFailed { target: String, reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::NotARepository { .. } => {
        Some("Run kite-release from inside the firmware repository (or `git init` first).".to_string())
      }
      GitError::CommitFailed { .. } => Some(
        "Check the git identity (user.name, user.email) and any pre-commit hooks.".to_string(),
      ),
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") || reason.contains("fetch first") {
          Some("The remote has commits you don't have. Pull first, then back up again.".to_string())
        } else if reason.contains("permission denied") || reason.contains("403") {
          Some("Check your credentials and push access to the remote repository.".to_string())
        } else {
          Some("Check the network connection, remote permissions and branch state.".to_string())
        }
      }
      GitError::StageFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::NotARepository { path } => {
        write!(f, "Not a git repository: {}", path.display())
      }
      GitError::StageFailed { stderr } => {
        write!(f, "Failed to stage changes\n{}", stderr.trim_end())
      }
      GitError::CommitFailed { stderr } => {
        write!(f, "Failed to create commit\n{}", stderr.trim_end())
      }
      GitError::PushFailed { target, reason } => {
        write!(f, "Push to {} failed: {}", target, reason.trim_end())
      }
    }
  }
}

/// Changelog version extraction errors
#[derive(Debug)]
pub enum VersionError {
  /// No vX.Y.Z.W token anywhere in the changelog
  NoVersionFound { changelog: PathBuf },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::NoVersionFound { .. } => Some(
        "Add an entry with a version token like v2.0.0.5 to the changelog.".to_string(),
      ),
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::NoVersionFound { changelog } => {
        write!(f, "No version found in changelog: {}", changelog.display())
      }
    }
  }
}

/// Config artifact errors
#[derive(Debug)]
pub enum ArtifactError {
  /// The generated header does not exist
  Missing { path: PathBuf },

  /// A recognized macro is absent from the artifact text
  MacroNotFound { name: String },
}

impl ArtifactError {
  fn help_message(&self) -> Option<String> {
    match self {
      ArtifactError::Missing { .. } => {
        Some("Check the `paths.artifact` entry in release.toml.".to_string())
      }
      ArtifactError::MacroNotFound { name } => Some(format!(
        "The artifact must carry a `#define {} <value>` line; regenerate the header if it was edited by hand.",
        name
      )),
    }
  }
}

impl fmt::Display for ArtifactError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArtifactError::Missing { path } => {
        write!(f, "Config artifact not found: {}", path.display())
      }
      ArtifactError::MacroNotFound { name } => {
        write!(f, "Macro {} not found in config artifact", name)
      }
    }
  }
}

/// Result type alias for kite-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
