//! Backup orchestration: stage → commit → push

pub mod orchestrator;

pub use orchestrator::{BackupOrchestrator, BackupOutcome, CommitStyle, PushTarget};
