mod artifact;
mod backup;
mod changelog;
mod commands;
mod core;
mod release;

use clap::{Parser, Subcommand};
use core::error::{ReleaseError, print_error};

/// Changelog-driven version bumps and git backups for the Kite Pilote firmware
#[derive(Parser)]
#[command(name = "kite-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Sync the config artifact version from the changelog
  Bump,

  /// Bump the version, then stage, commit and push to an explicit remote
  Backup {
    /// Remote to push to (default: release.toml, then "origin")
    #[arg(long)]
    remote: Option<String>,

    /// Branch to push (default: release.toml, then "main")
    #[arg(long)]
    branch: Option<String>,
  },

  /// Stage, commit and push a timestamped snapshot to the tracked upstream
  Quick,
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Bump => commands::run_bump(),
    Commands::Backup { remote, branch } => commands::run_backup(remote, branch),
    Commands::Quick => commands::run_quick(),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

/// Exit code 1 for every fatal stage; 0 is reserved for success and the
/// legitimate nothing-to-do outcome.
fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(1);
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}
