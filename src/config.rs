// ⚙️ Configuration - optional TOML file, then REVPCT_* environment variables
//
// Example revpct.toml:
//
//   [defaults]
//   total = 1000
//   rate = 10
//
//   [server]
//   bind = "127.0.0.1:3000"
//
//   [log]
//   filter = "revpct=debug"
//   file = "revpct.log"

use anyhow::{Context, Result};
use config::{Config as Loader, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::session::{DEFAULT_RATE, DEFAULT_TOTAL};

/// Config file used when REVPCT_CONFIG is not set
pub const DEFAULT_CONFIG_FILE: &str = "revpct.toml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// Initial input values of a new session
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Defaults {
    pub total: f64,
    pub rate: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            total: DEFAULT_TOTAL,
            rate: DEFAULT_RATE,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// EnvFilter directive, overridden by RUST_LOG
    pub filter: String,

    /// Log destination; stderr when unset (the TUI disables logging instead)
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load from `$REVPCT_CONFIG` (or `revpct.toml`) and the environment
    pub fn load() -> Result<Self> {
        let file = env::var("REVPCT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        Self::load_from(&file)
    }

    /// Load from a specific file; a missing file is not an error
    pub fn load_from(file: &str) -> Result<Self> {
        Self::load_with(file, environment())
    }

    fn load_with(file: &str, env: Environment) -> Result<Self> {
        let loader = Loader::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", file))?;

        loader.try_deserialize().context("Invalid configuration")
    }

    /// Parse configuration from TOML text, without the environment layer
    pub fn from_toml(text: &str) -> Result<Self> {
        let loader = Loader::builder()
            .add_source(File::from_str(text, config::FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?;

        loader.try_deserialize().context("Invalid configuration")
    }
}

/// `REVPCT_SERVER__BIND` -> `server.bind`: one `_` after the prefix, `__` between keys
fn environment() -> Environment {
    Environment::with_prefix("REVPCT")
        .prefix_separator("_")
        .separator("__")
}

// ============================================================================
// TESTS
// ============================================================================
