//! PNG encoding of styled frames.

use image::ImageFormat;
use std::io::Cursor;

use crate::error::{PipelineError, PipelineResult};
use crate::types::RasterImage;

/// Encode a frame as PNG bytes. `name` is only used for error context.
pub fn encode_png(image: &RasterImage, name: &str) -> PipelineResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| PipelineError::Encode {
            name: name.to_string(),
            message: e.to_string(),
        })?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_signature_and_round_trip() {
        let image = RasterImage::from_pixel(7, 3, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&image, "x.png").unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }
}
