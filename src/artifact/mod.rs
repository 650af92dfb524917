//! Generated config-header patching

pub mod patcher;

pub use patcher::ConfigPatcher;
