//! Configuration handling
//!
//! User preferences live in `config.toml` in the platform config directory
//! (for example `~/.config/nails/config.toml`). A different file can be
//! given with `--config` or `NAILS_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::levels;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,

    /// Level `play` starts on when `--level` is not given
    pub starting_level: u32,

    /// How often the terminal UI redraws without input, in milliseconds
    pub tick_rate_ms: u64,

    /// Open the help overlay when the terminal UI starts
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            starting_level: 1,
            tick_rate_ms: 250,
            show_help: false,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    ///
    /// A missing file yields the defaults. An explicit path that does not
    /// exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "nails", "nails").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_level == 0 || levels::get(self.starting_level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "starting_level must be between 1 and {}, got {}",
                levels::count(),
                self.starting_level
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".to_string()));
        }
        Ok(())
    }
}
