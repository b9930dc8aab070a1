//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$CLIMDIR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/climdir/config.toml`
//! 3. `~/.climdir/config.toml` (canonical location)
//!
//! # Validation
//!
//! Config values are validated after parsing: every key of the
//! `[defaults]` table must be a recognized, stored DRS field name.
//! `t_start`, `t_end` and `temporal_suffix` only exist as parts of
//! `temporal_subset`, so they cannot be defaulted on their own.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::fields::Field;

/// How commands print records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Cmip5File(name = 'value', ...)` for records, plain strings otherwise
    #[default]
    Text,
    /// JSON objects
    Json,
}

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// output = "json"
///
/// [defaults]
/// activity = "CMIP5"
/// product = "output1"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default output format
    pub output: Option<OutputFormat>,

    /// Field values applied before any explicitly supplied fields
    pub defaults: Option<IndexMap<String, String>>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a default names an unknown
    /// or derived field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(defaults) = &self.defaults {
            for name in defaults.keys() {
                let field = name.parse::<Field>().map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "unknown field '{}' in [defaults]",
                        name
                    ))
                })?;
                if field.is_derived() {
                    return Err(ConfigError::InvalidValue(format!(
                        "'{}' in [defaults] is derived from temporal_subset, set temporal_subset instead",
                        name
                    )));
                }
            }
        }

        Ok(())
    }
}
