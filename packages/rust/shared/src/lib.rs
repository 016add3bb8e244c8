//! Shared types, error model, and configuration for nodedocs.
//!
//! This crate is the foundation depended on by all other nodedocs crates.
//! It provides:
//! - [`NodeDocsError`]: the unified error type
//! - Domain types ([`OutlineNode`], [`IndexEntry`], [`MenuItem`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, ReposConfig, SourceConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{NodeDocsError, Result};
pub use types::{DESCRIPTION_MAX_CHARS, IndexEntry, MenuItem, OutlineNode};
