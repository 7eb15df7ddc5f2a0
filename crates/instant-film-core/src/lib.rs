//! Instant Film Core - turns photographs into instant film renditions.
//!
//! Each photo is decoded, softened by a two-pass resample, run through a
//! fixed effect stack (color grade, paper tint, vignette, grain, scratches,
//! light leak) and re-encoded as PNG. Batches of photos are processed
//! concurrently and can be bundled into a single ZIP archive.
//!
//! # Architecture
//!
//! ```text
//! files → BatchCoordinator → FilmProcessor → Resampler → EffectStack → PNG
//!                 ↓
//!               Batch → ArchivePackager → instant-film-photos.zip
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use instant_film_core::{
//!     BatchCoordinator, Config, FilmProcessor, InputFile, MonochromeToggle, NoopObserver,
//! };
//!
//! #[tokio::main]
//! async fn main() -> instant_film_core::Result<()> {
//!     let config = Config::load()?;
//!     let coordinator = BatchCoordinator::new(
//!         FilmProcessor::new(&config),
//!         MonochromeToggle::new(false),
//!         Arc::new(NoopObserver),
//!     );
//!
//!     let bytes = std::fs::read("beach.jpg")?;
//!     let summary = coordinator.submit(vec![InputFile::new("beach.jpg", bytes)]).wait().await;
//!     println!("{} styled", summary.succeeded);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod archive;
pub mod batch;
pub mod config;
pub mod effects;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use archive::ArchivePackager;
pub use batch::{
    Batch, BatchCoordinator, BatchHandle, BatchObserver, BatchSummary, MonochromeToggle,
    NoopObserver,
};
pub use config::Config;
pub use effects::{ColorGrade, EffectStack};
pub use error::{ArchiveError, ConfigError, FilmError, PipelineError, PipelineResult, Result};
pub use output::{OutputFormat, RecordWriter};
pub use pipeline::{DiscoveredFile, FileDiscovery, FilmProcessor, Resampler};
pub use types::{
    Download, InputFile, ProcessedResult, ProcessingRequest, RasterImage, ResultId, ResultRecord,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
