//! Release synchronization: changelog → config artifact

pub mod sync;

pub use sync::{ReleaseSynchronizer, SyncOutcome};
