//! Image decoding with format detection and optional dimension and timeout limits.

use image::{GenericImageView, ImageFormat};
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::PipelineError;
use crate::types::RasterImage;

/// Image decoder with optional limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
pub struct DecodedImage {
    /// Pixels converted to 8-bit RGBA
    pub image: RasterImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Size of the encoded input in bytes
    pub file_size: u64,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an in-memory file on the blocking pool.
    ///
    /// The decode timeout and dimension cap apply only when configured.
    pub async fn decode_from_bytes(
        &self,
        bytes: Vec<u8>,
        name: &str,
    ) -> Result<DecodedImage, PipelineError> {
        let name_owned = name.to_string();
        let task =
            tokio::task::spawn_blocking(move || Self::decode_bytes_sync(bytes, &name_owned));

        let joined = match self.limits.decode_timeout_ms {
            Some(timeout_ms) => timeout(Duration::from_millis(timeout_ms), task)
                .await
                .map_err(|_| PipelineError::Timeout {
                    name: name.to_string(),
                    stage: "decode".to_string(),
                    timeout_ms,
                })?,
            None => task.await,
        };

        let decoded = joined.map_err(|e| PipelineError::Decode {
            name: name.to_string(),
            message: format!("Task join error: {}", e),
        })??;

        if let Some(max_dim) = self.limits.max_image_dimension {
            if decoded.width > max_dim || decoded.height > max_dim {
                return Err(PipelineError::ImageTooLarge {
                    name: name.to_string(),
                    width: decoded.width,
                    height: decoded.height,
                    max_dim,
                });
            }
        }
        Ok(decoded)
    }

    /// Synchronous decode from bytes (runs in spawn_blocking).
    pub fn decode_bytes_sync(bytes: Vec<u8>, name: &str) -> Result<DecodedImage, PipelineError> {
        use std::io::Cursor;

        let file_size = bytes.len() as u64;
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                name: name.to_string(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = match reader.format() {
            Some(f) => f,
            None => {
                // Unknown magic bytes: trust the extension and let decode decide.
                let f = ImageFormat::from_path(name).map_err(|_| {
                    PipelineError::UnsupportedFormat {
                        name: name.to_string(),
                        format: name
                            .rsplit_once('.')
                            .map(|(_, ext)| ext)
                            .unwrap_or("unknown")
                            .to_string(),
                    }
                })?;
                reader.set_format(f);
                f
            }
        };
        let decoded = reader.decode().map_err(|e| PipelineError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = decoded.dimensions();
        Ok(DecodedImage {
            image: decoded.to_rgba8(),
            format,
            width,
            height,
            file_size,
        })
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        ImageFormat::Gif => "gif",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Tga => "tga",
        ImageFormat::Pnm => "pnm",
        ImageFormat::Qoi => "qoi",
        ImageFormat::Ico => "ico",
        _ => "unknown",
    }
}
