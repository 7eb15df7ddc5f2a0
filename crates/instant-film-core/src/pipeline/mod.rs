//! Per-file processing pipeline.
//!
//! - **discovery**: Expand paths into input files
//! - **validate**: Size and signature checks on raw bytes
//! - **decode**: Decode to RGBA off the async executor
//! - **resample**: Two-pass half-size resample
//! - **encode**: PNG output
//! - **processor**: Orchestrates the stages above plus the effect stack

pub mod decode;
pub mod discovery;
pub mod encode;
pub mod processor;
pub mod resample;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use encode::encode_png;
pub use processor::FilmProcessor;
pub use resample::Resampler;
pub use validate::Validator;
