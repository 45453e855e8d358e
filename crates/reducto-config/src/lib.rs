//! Configuration for reducto based tools
//!
//! This crate provides:
//! - Configuration file lookup (`.reducto.toml` in CWD, then in `$HOME`)
//! - Store configuration (StoreConfig) with environment overrides

pub mod config_file;
pub mod store_config;

pub use config_file::{
    find_config_file, load_config_file, read_config_file, search_paths, ConfigSource, CONFIG_FILE,
};
pub use store_config::{StoreConfig, DIAGNOSTICS_ENV};
