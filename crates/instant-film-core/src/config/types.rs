//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed filename offered for the bundled archive download.
pub const DEFAULT_ARCHIVE_NAME: &str = "instant-film-photos.zip";

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Initial value of the monochrome toggle
    pub monochrome: bool,

    /// Extensions picked up when scanning directories
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            monochrome: false,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
                "gif".to_string(),
                "bmp".to_string(),
                "tif".to_string(),
                "tiff".to_string(),
            ],
        }
    }
}

/// Optional resource limits. Every limit is off unless set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size_mb: Option<u64>,

    /// Maximum image dimension (width or height)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_image_dimension: Option<u32>,

    /// Decode timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_timeout_ms: Option<u64>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory styled images and archives are written to
    pub dir: PathBuf,

    /// Filename of the bundled archive
    pub archive_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./instant-film"),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
