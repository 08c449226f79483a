//! Configuration for the `screenstore` tool.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why `config.toml` could not be turned into a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read screenstore config '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed TOML in screenstore config '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid screenstore config: {message}")]
    ValidationError { message: String },
}

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log file path prefix. Logs go to stderr when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// How the CLI prints stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output (default: true).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// `screenstore/config.toml` under the platform config directory, or
    /// under the working directory when the platform has none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("screenstore").join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`. A missing file means defaults: the CLI runs without any
    /// config at all.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "log.filter must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
