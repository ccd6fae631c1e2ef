//! Loader configuration
//!
//! Read from a JSON file at the program entry point and passed explicitly to
//! the loader. Every field has a default that matches the platform's export
//! conventions, so an empty object `{}` is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Casting conventions for text columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// chrono format strings tried in order when parsing datetimes
    #[serde(default = "default_datetime_formats")]
    pub datetime_formats: Vec<String>,

    /// Text values read as null when casting to numeric or datetime types
    #[serde(default = "default_null_tokens")]
    pub null_tokens: Vec<String>,

    /// Strip surrounding whitespace before parsing numbers and datetimes
    #[serde(default = "default_trim_whitespace")]
    pub trim_whitespace: bool,
}

/// Export timestamp format, e.g. `20210526T131808.371 GMT`
pub const PEGA_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S%.f GMT";

fn default_datetime_formats() -> Vec<String> {
    vec![
        PEGA_DATETIME_FORMAT.to_string(),
        "%Y-%m-%d %H:%M:%S%.f".to_string(),
        "%Y-%m-%dT%H:%M:%S%.f".to_string(),
    ]
}

fn default_null_tokens() -> Vec<String> {
    vec![String::new()]
}

fn default_trim_whitespace() -> bool {
    true
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            datetime_formats: default_datetime_formats(),
            null_tokens: default_null_tokens(),
            trim_whitespace: default_trim_whitespace(),
        }
    }
}

impl LoaderConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: LoaderConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could never parse a value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.datetime_formats.is_empty() {
            return Err(ConfigError::Invalid(
                "datetime_formats must list at least one format".into(),
            ));
        }

        for fmt in &self.datetime_formats {
            if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
                return Err(ConfigError::Invalid(format!(
                    "Invalid datetime format: '{}'",
                    fmt
                )));
            }
        }

        Ok(())
    }

    /// Whether a text value counts as null
    pub fn is_null_token(&self, value: &str) -> bool {
        self.null_tokens.iter().any(|t| t == value)
    }
}
