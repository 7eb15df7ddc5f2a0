//! Core data types for the instant film pipeline.
//!
//! A file enters as an [`InputFile`], becomes a [`ProcessingRequest`] once
//! decoded, and leaves as a self-contained [`ProcessedResult`].

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Decoded pixel buffer: RGBA, 8 bits per channel, row-major, top-left origin.
///
/// `image::RgbaImage` guarantees `len == width * height * 4`.
pub type RasterImage = RgbaImage;

/// Prefix applied to every styled output filename.
pub const OUTPUT_PREFIX: &str = "instant-film-";

/// A raw file handed over by the file-selection collaborator.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Original filename, including extension
    pub name: String,
    /// Undecoded file contents
    pub bytes: Vec<u8>,
}

impl InputFile {
    /// Create a new input file.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A decoded image ready for styling.
#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    file_name: String,
    image: RasterImage,
    monochrome: bool,
}

impl ProcessingRequest {
    /// Create a request from an already decoded image.
    pub fn new(file_name: impl Into<String>, image: RasterImage, monochrome: bool) -> Self {
        Self {
            file_name: file_name.into(),
            image,
            monochrome,
        }
    }

    /// Original filename.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Decoded source image.
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    /// Whether the grayscale grade replaces the color grade.
    pub fn monochrome(&self) -> bool {
        self.monochrome
    }

    /// Consume the request, yielding its parts.
    pub fn into_parts(self) -> (String, RasterImage, bool) {
        (self.file_name, self.image, self.monochrome)
    }
}

/// Opaque identity of a result, unique within the process.
///
/// Assigned when a file finishes styling, before it reaches a batch; a
/// discarded stale result consumes an id that never shows up in any batch.
///
/// Output filenames can collide (`a.jpg` and `a.png` both become
/// `instant-film-a.png`), so removal and download go through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultId(pub u64);

impl std::fmt::Display for ResultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A finished, encoded styled image.
#[derive(Debug, Clone)]
pub struct ProcessedResult {
    /// Identity assigned when styling finished
    pub id: ResultId,
    /// `instant-film-<basename>.png`
    pub file_name: String,
    /// PNG-encoded bytes, shared cheaply between batch, gallery and archive
    pub bytes: Arc<[u8]>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Whether the grayscale grade was used
    pub monochrome: bool,
}

/// A file ready to hand to a download collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested filename
    pub file_name: String,
    /// File contents
    pub bytes: Arc<[u8]>,
}

/// Serializable summary of a result, for machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultRecord {
    pub id: ResultId,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub monochrome: bool,
    pub size_bytes: usize,
}

impl From<&ProcessedResult> for ResultRecord {
    fn from(result: &ProcessedResult) -> Self {
        Self {
            id: result.id,
            file_name: result.file_name.clone(),
            width: result.width,
            height: result.height,
            monochrome: result.monochrome,
            size_bytes: result.bytes.len(),
        }
    }
}

/// Derive the styled output filename from an original filename.
///
/// Strips the final extension and adds the `instant-film-` prefix and a
/// `.png` extension. A name with no extension is used whole.
pub fn output_file_name(original: &str) -> String {
    let stem = match original.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => original,
    };
    format!("{OUTPUT_PREFIX}{stem}.png")
}

/// "N file(s) selected" label shown next to the file picker.
pub fn count_label(count: usize) -> String {
    format!(
        "{} file{} selected",
        count,
        if count == 1 { "" } else { "s" }
    )
}
