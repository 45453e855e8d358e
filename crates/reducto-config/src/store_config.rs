//! Store configuration
//!
//! Loaded from .reducto.toml, every field is optional.
//!
//! ```toml
//! diagnostics = "production"
//! log_level = "debug"
//! echo_state = false
//! ```

use crate::config_file::ConfigSource;
use anyhow::{bail, Context, Result};
use reducto::{Diagnostics, DiagnosticsMode};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Environment variable overriding the diagnostics mode
pub const DIAGNOSTICS_ENV: &str = "REDUCTO_DIAGNOSTICS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Whether development warnings (state shape checks) are emitted
    #[serde(default)]
    pub diagnostics: DiagnosticsMode,

    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print the state after every notification
    #[serde(default = "default_echo_state")]
    pub echo_state: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_echo_state() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            diagnostics: DiagnosticsMode::default(),
            log_level: default_log_level(),
            echo_state: default_echo_state(),
        }
    }
}

impl StoreConfig {
    /// Load config from CWD first, then home directory, or use defaults.
    /// Environment overrides are applied last.
    pub fn load() -> Self {
        let env_value = env::var(DIAGNOSTICS_ENV).ok();
        Self::from_source(crate::load_config_file(), env_value.as_deref())
    }

    /// Build the config from a found file (if any) and the value of
    /// `REDUCTO_DIAGNOSTICS`. A file that does not parse falls back to defaults.
    pub fn from_source(source: Option<ConfigSource>, env_value: Option<&str>) -> Self {
        let mut config = match source {
            Some(source) => Self::from_toml_str(&source.content).unwrap_or_else(|e| {
                log::warn!("Failed to parse {}: {:#}", source.path.display(), e);
                Self::default()
            }),
            None => {
                log::debug!("Using default store config");
                Self::default()
            }
        };
        config.apply_env_value(env_value);
        config
    }

    /// Load an explicit config file; unlike [`StoreConfig::load`] errors are returned
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = crate::read_config_file(path)?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_env_value(env::var(DIAGNOSTICS_ENV).ok().as_deref());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse store config")
    }

    /// Apply a `REDUCTO_DIAGNOSTICS` value, ignoring values that cannot be
    /// understood
    pub fn apply_env_value(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        match parse_mode(value) {
            Ok(mode) => self.diagnostics = mode,
            Err(e) => log::warn!("Ignoring {}: {}", DIAGNOSTICS_ENV, e),
        }
    }

    /// Diagnostics for combined reducers, warnings go to the log
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(self.diagnostics)
    }
}

fn parse_mode(value: &str) -> Result<DiagnosticsMode> {
    match value.trim().to_lowercase().as_str() {
        "development" | "dev" => Ok(DiagnosticsMode::Development),
        "production" | "prod" => Ok(DiagnosticsMode::Production),
        other => bail!("unknown diagnostics mode \"{}\"", other),
    }
}
