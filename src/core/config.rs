//! Configuration management for HandoverX.
//!
//! Handles loading and saving configuration from TOML files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::context::Context;
use super::error::{ConfigError, ParseFormatError};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Stage pacing delays
    pub pacing: PacingConfig,

    /// Report output settings
    pub output: OutputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Context selected for a fresh session
    pub default_context: Context,
}

/// Cosmetic delays applied between workflow stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay before the analysis result is delivered (milliseconds)
    pub analyze_delay_ms: u64,

    /// Delay of the generating stage before the summary (milliseconds)
    pub generate_delay_ms: u64,
}

/// Report output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format
    pub format: OutputFormat,
}

/// Rendering format for a finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

impl PacingConfig {
    /// Pacing with no delays, for scripted use and tests.
    pub fn instant() -> Self {
        Self { analyze_delay_ms: 0, generate_delay_ms: 0 }
    }

    /// Delay before the analysis result is delivered.
    pub fn analyze_delay(&self) -> Duration {
        Duration::from_millis(self.analyze_delay_ms)
    }

    /// Delay of the generating stage.
    pub fn generate_delay(&self) -> Duration {
        Duration::from_millis(self.generate_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { analyze_delay_ms: 2000, generate_delay_ms: 1500 }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.handoverx.toml` in current directory
    /// 2. `~/.config/handoverx/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        let local_config = PathBuf::from(".handoverx.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(global_config) = Self::config_dir().map(|d| d.join("config.toml")) {
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Io { path: parent.to_path_buf(), source })?;
        }
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }

    /// Save configuration to the global config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let dir = Self::config_dir().ok_or(ConfigError::NoConfigDir)?;
        self.save_to_file(&dir.join("config.toml"))
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("handoverx"))
    }
}
