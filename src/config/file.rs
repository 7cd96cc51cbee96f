//! TOML configuration.
//!
//! Every section is optional and falls back to its defaults, so an
//! empty file is a valid configuration.

use crate::generator::{DEFAULT_PRONOUNCEABLE_LENGTH, DEFAULT_VARIATION_COUNT};
use crate::policy::Policy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The `[policy]` section is invalid.
    #[error("invalid policy: {0}")]
    InvalidPolicy(#[from] crate::policy::PolicyError),
    /// A length is zero or above `max_length`.
    #[error("invalid length {length} for {field} (must be 1-{max})")]
    InvalidLength {
        /// Name of the offending setting or request field.
        field: &'static str,
        /// The rejected length.
        length: usize,
        /// Configured upper bound.
        max: usize,
    },
    /// `history_limit` is zero.
    #[error("history limit must be at least 1")]
    InvalidHistoryLimit,
    /// `rotation_days` is zero.
    #[error("rotation period must be at least 1 day")]
    InvalidRotationPeriod,
    /// `max_sessions` is zero.
    #[error("server must allow at least 1 session")]
    InvalidSessionCap,
    /// `idle_timeout_secs` is zero.
    #[error("session idle timeout must be at least 1 second")]
    InvalidIdleTimeout,
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Initial policy for every new session.
    #[serde(default)]
    pub policy: Policy,
    /// Generation defaults and limits.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// History, rotation and server session limits.
    #[serde(default)]
    pub session: SessionConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Length used when a request omits one.
    pub default_length: usize,
    /// Letters in a pronounceable password (before the suffix).
    pub pronounceable_length: usize,
    /// Variations produced per analysis.
    pub variation_count: usize,
    /// Upper bound on any requested length.
    pub max_length: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_length: 16,
            pronounceable_length: DEFAULT_PRONOUNCEABLE_LENGTH,
            variation_count: DEFAULT_VARIATION_COUNT,
            max_length: 1024,
        }
    }
}

impl GeneratorConfig {
    /// Checks a requested length against `1..=max_length`.
    pub fn check_length(&self, field: &'static str, length: usize) -> Result<usize, ConfigError> {
        if length == 0 || length > self.max_length {
            return Err(ConfigError::InvalidLength {
                field,
                length,
                max: self.max_length,
            });
        }
        Ok(length)
    }
}

/// Session bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of generated passwords kept in history.
    pub history_limit: usize,
    /// Days between password rotations.
    pub rotation_days: u32,
    /// Most sessions the server holds at once.
    pub max_sessions: usize,
    /// Seconds of inactivity before a server session is dropped.
    pub idle_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: 5,
            rotation_days: 90,
            max_sessions: 1024,
            idle_timeout_secs: 30 * 60,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;
        self.generator
            .check_length("default_length", self.generator.default_length)?;
        self.generator
            .check_length("pronounceable_length", self.generator.pronounceable_length)?;
        if self.session.history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit);
        }
        if self.session.rotation_days == 0 {
            return Err(ConfigError::InvalidRotationPeriod);
        }
        if self.session.max_sessions == 0 {
            return Err(ConfigError::InvalidSessionCap);
        }
        if self.session.idle_timeout_secs == 0 {
            return Err(ConfigError::InvalidIdleTimeout);
        }
        Ok(())
    }
}
