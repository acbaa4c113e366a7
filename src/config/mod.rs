//! Configuration management for MealScout.
//!
//! Loads and saves the user configuration from a TOML file in the
//! platform-specific config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default recommendation service URL.
const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Default autocomplete debounce interval in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default number of ingredient suggestions to request.
const DEFAULT_SUGGESTION_LIMIT: u32 = 5;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not determine the platform config directory.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Failed to read the config file.
    #[error("Failed to read configuration: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file.
    #[error("Failed to write configuration: {0}")]
    WriteError(#[source] std::io::Error),

    /// The config file is not valid TOML.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Serialization failed (should not happen in practice).
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A field failed validation.
    #[error("Configuration error: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the recommendation service.
    pub server_url: String,
    /// Debounce interval for autocomplete queries, in milliseconds.
    pub debounce_ms: u64,
    /// Number of ingredient suggestions to request per query.
    pub suggestion_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        self.save_to(&path)
    }

    /// Save the configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "server_url '{}' must start with http:// or https://",
                self.server_url
            )));
        }

        if self.suggestion_limit == 0 {
            return Err(ConfigError::ValidationError(
                "suggestion_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Path to the config file.
    fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("mealscout").join("config.toml"))
    }
}
