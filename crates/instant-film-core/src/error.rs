//! Error types for the instant film pipeline.
//!
//! Errors are organized by concern so that a failure in one file of a batch
//! can be logged and skipped without touching its siblings, while archive and
//! configuration failures are surfaced to the caller.

use thiserror::Error;

/// Top-level error type for instant film operations.
#[derive(Error, Debug)]
pub enum FilmError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-file pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Archive creation errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
///
/// Every variant except `InvalidDimensions` describes a bad input file and is
/// handled by skipping that file.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source bytes could not be decoded as an image
    #[error("Decode error for {name}: {message}")]
    Decode { name: String, message: String },

    /// Resampler was asked for a zero-sized target
    #[error("Invalid resample dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding of the styled frame failed
    #[error("Encode error for {name}: {message}")]
    Encode { name: String, message: String },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {name} after {timeout_ms}ms")]
    Timeout {
        name: String,
        stage: String,
        timeout_ms: u64,
    },

    /// File exceeds size limit
    #[error("File too large: {name} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        name: String,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {name} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        name: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Unsupported image format
    #[error("Unsupported format for {name}: {format}")]
    UnsupportedFormat { name: String, format: String },
}

/// Archive packaging errors.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The zip writer rejected an entry or failed to finalize
    #[error("Failed to package archive: {0}")]
    Packaging(#[from] zip::result::ZipError),

    /// Writing entry bytes into the archive failed
    #[error("Failed to write archive entry {name}: {source}")]
    Entry {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for instant film results.
pub type Result<T> = std::result::Result<T, FilmError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
