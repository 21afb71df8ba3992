//! Configuration Management
//!
//! Hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/controltower/config.toml)
//! 3. Project config (.controltower/config.toml)
//! 4. Environment variables (CONTROLTOWER_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
