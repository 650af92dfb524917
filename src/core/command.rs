//! External command execution with captured output and failure classification
//!
//! Everything kite-release shells out to goes through [`CommandRunner`] so
//! that callers can tell apart "program missing" from "program ran and
//! failed", and so captured output is never lost on the failure path.

use crate::core::error::{CommandError, ReleaseError, ReleaseResult};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured outcome of one external command invocation
#[derive(Debug, Clone)]
pub struct CommandResult {
  /// Captured standard output, right-trimmed
  pub stdout: String,
  /// Captured standard error, untrimmed
  pub stderr: String,
  /// Process exit code (-1 when killed by a signal)
  pub exit_code: i32,
  /// Whether the process exited with code 0
  pub succeeded: bool,
}

/// Runs external commands in a fixed working directory
#[derive(Debug)]
pub struct CommandRunner {
  work_dir: PathBuf,
}

impl CommandRunner {
  pub fn new(work_dir: &Path) -> Self {
    Self {
      work_dir: work_dir.to_path_buf(),
    }
  }

  /// Run a command, tolerating non-zero exits.
  ///
  /// A non-zero exit is a legitimate result for some callers (status
  /// queries treat "no output" as a negative answer), so it is reported
  /// through `succeeded`, not as an error. Only a missing executable or a
  /// spawn failure errors out.
  pub fn run(&self, program: &str, args: &[&str]) -> ReleaseResult<CommandResult> {
    let output = Command::new(program)
      .current_dir(&self.work_dir)
      .args(args)
      .output()
      .map_err(|e| classify_spawn_error(program, e))?;

    Ok(CommandResult {
      stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      exit_code: output.status.code().unwrap_or(-1),
      succeeded: output.status.success(),
    })
  }

  /// Run a command, treating a non-zero exit as an error.
  ///
  /// Used for prerequisite checks where failure means the run cannot
  /// continue. The captured streams travel with the error.
  pub fn run_checked(&self, program: &str, args: &[&str]) -> ReleaseResult<CommandResult> {
    let result = self.run(program, args)?;
    if !result.succeeded {
      return Err(ReleaseError::Command(CommandError::Failed {
        command: render_command(program, args),
        exit_code: result.exit_code,
        stdout: result.stdout,
        stderr: result.stderr,
      }));
    }
    Ok(result)
  }
}

fn classify_spawn_error(program: &str, err: io::Error) -> ReleaseError {
  if err.kind() == io::ErrorKind::NotFound {
    ReleaseError::Command(CommandError::NotFound {
      program: program.to_string(),
    })
  } else {
    ReleaseError::Io(err)
  }
}

fn render_command(program: &str, args: &[&str]) -> String {
  let mut rendered = program.to_string();
  for arg in args {
    rendered.push(' ');
    rendered.push_str(arg);
  }
  rendered
}
