//! Store configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// How the inventory store is opened and how it behaves after writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory for the file-backed store; `None` uses the OS data dir.
    pub data_dir: Option<PathBuf>,
    /// Run the sheet sync after every mutating operation.
    pub auto_sync: bool,
    /// Seed sample records into an empty inventory when the store opens.
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            auto_sync: true,
            seed_sample_data: false,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// - `STOCKROOM_DATA_DIR`
    /// - `STOCKROOM_AUTO_SYNC` (bool, default `true`)
    /// - `STOCKROOM_SEED_SAMPLE_DATA` (bool, default `false`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`] against an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("STOCKROOM_DATA_DIR")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let auto_sync = match lookup("STOCKROOM_AUTO_SYNC") {
            Some(v) => parse_bool("STOCKROOM_AUTO_SYNC", &v)?,
            None => defaults.auto_sync,
        };

        let seed_sample_data = match lookup("STOCKROOM_SEED_SAMPLE_DATA") {
            Some(v) => parse_bool("STOCKROOM_SEED_SAMPLE_DATA", &v)?,
            None => defaults.seed_sample_data,
        };

        Ok(Self {
            data_dir,
            auto_sync,
            seed_sample_data,
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {name} must be a boolean, got '{value}'")]
    InvalidBool { name: &'static str, value: String },
}
