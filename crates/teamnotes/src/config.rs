//! Configuration management for teamnotes.
//!
//! Configuration is layered with figment: built-in defaults, then a TOML
//! file, then environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "teamnotes";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "teamnotes.db";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "TEAMNOTES_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables prefixed with `TEAMNOTES_`, sections separated
///    by a double underscore (`TEAMNOTES_RECORDS__INSERTION_ORDER=prepend`)
/// 2. TOML config file at `~/.config/teamnotes/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Record store configuration.
    pub records: RecordsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/teamnotes/teamnotes.db`
    pub database_path: Option<PathBuf>,
}

/// Where newly created records are placed in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionOrder {
    /// Group records by owning team; new records go first within their team.
    #[default]
    Clustered,
    /// New records go to the front of the whole collection.
    Prepend,
}

impl std::fmt::Display for InsertionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clustered => write!(f, "clustered"),
            Self::Prepend => write!(f, "prepend"),
        }
    }
}

/// Record store configuration.
///
/// Length limits are off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// Placement policy for new records.
    pub insertion_order: InsertionOrder,
    /// Maximum title length in characters. 0 for unlimited.
    pub max_title_length: usize,
    /// Maximum content length in characters. 0 for unlimited.
    pub max_content_length: usize,
}

impl RecordsConfig {
    /// Reject a title or content that exceeds the configured limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the offending field.
    pub fn check_lengths(&self, title: Option<&str>, content: Option<&str>) -> Result<()> {
        check_length("title", title, self.max_title_length)?;
        check_length("content", content, self.max_content_length)
    }
}

fn check_length(field: &str, value: Option<&str>, limit: usize) -> Result<()> {
    match value {
        Some(value) if limit > 0 && value.chars().count() > limit => Err(Error::invalid_input(
            format!("{field} is longer than {limit} characters"),
        )),
        _ => Ok(()),
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "database_path cannot be empty".to_string(),
                });
            }
        }

        let records = &self.records;
        if records.max_title_length > 0
            && records.max_content_length > 0
            && records.max_title_length > records.max_content_length
        {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_title_length ({}) cannot be greater than max_content_length ({})",
                    records.max_title_length, records.max_content_length
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
