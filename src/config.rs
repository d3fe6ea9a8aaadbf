//! Configuration management for Spin Wheel.
//!
//! This module handles loading and managing application configuration from a TOML file
//! located at `~/.spin-wheel/config.toml`. Configuration covers the spin animation,
//! where entries and results are stored, UI preferences, and logging.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure for Spin Wheel.
///
/// All configuration options are optional and will fall back to sensible defaults
/// if not specified in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Spin animation options
    #[serde(default)]
    pub spin: SpinConfig,

    /// Persistence options
    #[serde(default)]
    pub storage: StorageConfig,

    /// UI and display configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// Log file configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Spin animation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Full turns added to every spin before the random fraction
    #[serde(default = "default_turns")]
    pub turns: u32,

    /// Length of the spin animation in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

/// Where the entry list and results log are kept.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding `list.json` and `results.json`.
    /// If not specified, the config directory is used.
    pub data_dir: Option<PathBuf>,
}

/// UI configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme for the UI
    /// Options: "dark", "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

/// Logging configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file name, relative to the config directory
    #[serde(default = "default_log_file")]
    pub file: String,
}

// Default value functions for serde
fn default_turns() -> u32 {
    20
}

fn default_duration_ms() -> u64 {
    10_000
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "spin-wheel.log".to_string()
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            turns: default_turns(),
            duration_ms: default_duration_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Config {
    /// Returns the path to the configuration directory (~/.spin-wheel/)
    pub fn config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(".spin-wheel"))
    }

    /// Returns the path to the configuration file (~/.spin-wheel/config.toml)
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory used for `list.json` / `results.json`.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// Full path of the log file.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(&self.logging.file))
    }

    /// Loads configuration from the config file, creating a default if it doesn't exist.
    ///
    /// # Behavior
    /// 1. If the config file exists, parse and return it
    /// 2. If the config file doesn't exist, create default config file and return defaults
    /// 3. If parsing fails, return error with context
    ///
    /// # Errors
    /// This function will return an error if:
    /// - Home directory cannot be determined
    /// - File I/O operations fail
    /// - TOML parsing fails
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {config_path:?}"))?;

            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {config_path:?}"))
        } else {
            let default_config = Config::default();
            default_config.create_default_config()?;
            Ok(default_config)
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Creates a default configuration file at ~/.spin-wheel/config.toml
    ///
    /// This function will create the config directory if it doesn't exist, then
    /// write a default configuration file with helpful comments.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - Directory creation fails
    /// - File write operations fail
    pub fn create_default_config(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        let config_path = Self::config_file_path()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {config_dir:?}"))?;
        }

        fs::write(&config_path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Failed to write config file: {config_path:?}"))?;

        Ok(())
    }
}

const DEFAULT_CONFIG_TOML: &str = r#"# Spin Wheel Configuration File
# This file is automatically generated with default values.
# You can edit this file to customize Spin Wheel's behavior.

[spin]
# Full turns the wheel makes before the random final fraction
turns = 20

# Length of the spin animation in milliseconds
duration_ms = 10000

[storage]
# Directory for list.json and results.json (optional)
# If not specified, ~/.spin-wheel is used
# data_dir = "/home/me/.local/share/spin-wheel"

[ui]
# Color theme
# Options: "dark", "light"
theme = "dark"

[logging]
# Level filter; RUST_LOG takes precedence when set
level = "info"

# Log file, relative to ~/.spin-wheel
file = "spin-wheel.log"
"#;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.spin.turns, 20);
        assert_eq!(config.spin.duration_ms, 10_000);
        assert_eq!(config.ui.theme, "dark");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "spin-wheel.log");
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
[spin]
turns = 5
duration_ms = 2500

[storage]
data_dir = "/tmp/wheel"

[ui]
theme = "light"

[logging]
level = "debug"
"#;

        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.spin.turns, 5);
        assert_eq!(config.spin.duration_ms, 2500);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/wheel")));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/wheel"));
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "spin-wheel.log");
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[spin]
duration_ms = 3000
"#;

        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.spin.duration_ms, 3000);
        // Should use defaults for other fields
        assert_eq!(config.spin.turns, 20);
        assert_eq!(config.ui.theme, "dark");
    }

    #[test]
    fn test_generated_default_file_matches_defaults() {
        let config = Config::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        let defaults = Config::default();
        assert_eq!(config.spin.turns, defaults.spin.turns);
        assert_eq!(config.spin.duration_ms, defaults.spin.duration_ms);
        assert_eq!(config.ui.theme, defaults.ui.theme);
        assert_eq!(config.logging.level, defaults.logging.level);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("[spin\nturns = ").is_err());
    }
}
