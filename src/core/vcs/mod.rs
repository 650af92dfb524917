//! Git operations abstraction (SystemGit)

pub mod system_git;

pub use system_git::SystemGit;
