//! Configuration management for instant film.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. All config structs implement `Default`, so a missing file or a
//! partial file both work.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processing settings
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.instant-film.instant-film/config.toml
    /// - Linux: ~/.config/instant-film/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\instant-film\config\config.toml
    ///
    /// Falls back to ~/.instant-film/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "instant-film", "instant-film")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".instant-film").join("config.toml")
            })
    }

    /// Get the resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        let path_str = self.output.dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Render the config as a commented TOML file.
    ///
    /// Unset limits are written commented out with a suggested value, so the
    /// rendered file loads back to the same config.
    pub fn template(&self) -> String {
        let quoted = |s: &str| toml::Value::String(s.to_string()).to_string();
        let formats = toml::Value::Array(
            self.processing
                .supported_formats
                .iter()
                .map(|f| toml::Value::String(f.clone()))
                .collect(),
        );

        format!(
            "# Instant Film configuration

[processing]
# Develop in black and white instead of color film
monochrome = {monochrome}
# Extensions picked up when scanning directories
supported_formats = {formats}

[limits]
# Optional safety limits. Leave commented out for no limit.
{max_file_size}
{max_dimension}
{decode_timeout}

[output]
# Where styled photos and the archive are written (~ is expanded)
dir = {dir}
archive_name = {archive_name}

[logging]
# error, warn, info, debug or trace
level = {level}
# \"pretty\" or \"json\"
format = {format}
",
            monochrome = self.processing.monochrome,
            max_file_size = limit_line("max_file_size_mb", self.limits.max_file_size_mb, 100),
            max_dimension = limit_line(
                "max_image_dimension",
                self.limits.max_image_dimension,
                10_000
            ),
            decode_timeout = limit_line("decode_timeout_ms", self.limits.decode_timeout_ms, 5000),
            dir = quoted(&self.output.dir.to_string_lossy()),
            archive_name = quoted(&self.output.archive_name),
            level = quoted(&self.logging.level),
            format = quoted(&self.logging.format),
        )
    }
}

fn limit_line<T: std::fmt::Display>(key: &str, value: Option<T>, suggested: T) -> String {
    match value {
        Some(value) => format!("{key} = {value}"),
        None => format!("# {key} = {suggested}"),
    }
}
