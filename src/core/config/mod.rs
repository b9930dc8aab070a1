//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! climdir has a single, optional, user-level config file. It sets the
//! default output format and field values that `generate` applies before
//! any fields given on the command line.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$CLIMDIR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/climdir/config.toml`
//! 3. `~/.climdir/config.toml` (canonical location)
//!
//! # Example
//!
//! ```no_run
//! use climdir::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Output: {:?}", config.output());
//! for (name, value) in config.defaults() {
//!     println!("{name} = {value}");
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, OutputFormat};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CLIMDIR_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. A missing config file is not an error.
    pub fn load() -> Result<Config, ConfigError> {
        let candidates = Self::candidate_paths(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );

        match candidates.into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Wrap an in-memory global config that was not read from a file.
    pub fn from_global(global: GlobalConfig) -> Config {
        Config { global, path: None }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        global.validate()?;

        Ok(Config {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Candidate config paths, in search order.
    pub fn candidate_paths(
        env: Option<PathBuf>,
        xdg_config_home: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = env {
            paths.push(path);
        }
        if let Some(xdg) = xdg_config_home {
            paths.push(xdg.join("climdir/config.toml"));
        }
        if let Some(home) = home {
            paths.push(home.join(".climdir/config.toml"));
        }
        paths
    }

    /// Path of the file this config was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Output format (default: text).
    pub fn output(&self) -> OutputFormat {
        self.global.output.unwrap_or_default()
    }

    /// Default field values, in file order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.global
            .defaults
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
