//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_file_size_mb == Some(0) {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0 when set".into(),
            ));
        }
        if self.limits.max_image_dimension == Some(0) {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0 when set".into(),
            ));
        }
        if self.limits.decode_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0 when set".into(),
            ));
        }
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if self.output.archive_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.archive_name must not be empty".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}
