//! CLI commands for kite-release
//!
//! - **bump**: sync the config artifact version from the changelog
//! - **backup**: versioned stage → commit → push to an explicit remote
//! - **quick**: timestamped snapshot pushed to the tracked upstream
//!
//! Progress narration goes to stdout; diagnostics go to stderr through
//! `print_error` in main. The exit code is the only machine-readable
//! success signal.

pub mod backup;
pub mod bump;
pub mod quick;

pub use backup::run_backup;
pub use bump::run_bump;
pub use quick::run_quick;
