//! # expertmgr-core
//!
//! Core library for Expert Manager providing:
//! - Installation tree, registration and health types
//! - The hierarchical store abstraction and its memory/YAML implementations
//! - Hierarchical configuration loading
//! - Error types shared by the engine and the CLI

pub mod config;
pub mod error;
pub mod store;
pub mod types;
pub mod utils;

pub use config::{HierarchicalConfigLoader, ManagerConfig};
pub use error::{Error, Result};
pub use store::{ConfigStore, FileProbe, MemoryStore, OsFileProbe, YamlStore};
pub use utils::get_home_dir;
