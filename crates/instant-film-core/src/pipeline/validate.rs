//! Cheap input checks before a full decode.
//!
//! Format sniffing is left to the decoder, so anything `image` can read
//! gets through here.

use crate::config::LimitsConfig;
use crate::error::PipelineError;
use crate::types::InputFile;

/// Validates raw input files before decoding.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Checks:
    /// - The file is not empty
    /// - File size is within the configured limit, if any
    pub fn validate(&self, file: &InputFile) -> Result<(), PipelineError> {
        if file.bytes.is_empty() {
            return Err(PipelineError::Decode {
                name: file.name.clone(),
                message: "File is empty".to_string(),
            });
        }

        if let Some(max_mb) = self.limits.max_file_size_mb {
            let len = file.bytes.len() as u64;
            if len > max_mb * 1024 * 1024 {
                return Err(PipelineError::FileTooLarge {
                    name: file.name.clone(),
                    size_mb: len / (1024 * 1024),
                    max_mb,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(bytes: &[u8]) -> InputFile {
        InputFile::new("input.bin", bytes.to_vec())
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let validator = Validator::new(LimitsConfig::default());
        assert!(matches!(
            validator.validate(&file(&[])),
            Err(PipelineError::Decode { .. })
        ));
    }

    #[test]
    fn test_validate_leaves_unknown_signatures_to_decoder() {
        let validator = Validator::new(LimitsConfig::default());
        // TGA has no magic bytes
        assert!(validator.validate(&file(&[0, 0, 2, 0, 0, 0])).is_ok());
        assert!(validator.validate(&file(b"hello world!")).is_ok());
    }

    #[test]
    fn test_validate_without_limit_accepts_large_file() {
        let validator = Validator::new(LimitsConfig::default());
        let bytes = vec![0u8; 2 * 1024 * 1024];
        assert!(validator.validate(&file(&bytes)).is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let limits = LimitsConfig {
            max_file_size_mb: Some(1),
            ..LimitsConfig::default()
        };
        let validator = Validator::new(limits);
        let mut bytes = vec![0x89, b'P', b'N', b'G'];
        bytes.resize(1024 * 1024 + 1, 0);
        assert!(matches!(
            validator.validate(&file(&bytes)),
            Err(PipelineError::FileTooLarge { max_mb: 1, .. })
        ));
    }
}
