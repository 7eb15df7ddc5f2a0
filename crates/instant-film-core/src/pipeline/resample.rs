//! Two-pass resampling.
//!
//! The source is first drawn at half size, then the half-size intermediate is
//! drawn into the target. Even when the target equals the source size, the
//! round trip softens the frame; that softness is part of the look.

use image::imageops::{self, FilterType};

use crate::error::{PipelineError, PipelineResult};
use crate::types::RasterImage;

/// Interpolation used for both passes.
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

pub struct Resampler;

impl Resampler {
    /// Resize `source` to `target_width` x `target_height` via a half-size pass.
    pub fn resize(
        source: &RasterImage,
        target_width: u32,
        target_height: u32,
    ) -> PipelineResult<RasterImage> {
        if target_width == 0 || target_height == 0 {
            return Err(PipelineError::InvalidDimensions {
                width: target_width,
                height: target_height,
            });
        }
        if source.width() == 0 || source.height() == 0 {
            return Err(PipelineError::InvalidDimensions {
                width: source.width(),
                height: source.height(),
            });
        }

        let (half_width, half_height) = Self::half_size(source.width(), source.height());
        let half = imageops::resize(source, half_width, half_height, RESAMPLE_FILTER);
        Ok(imageops::resize(
            &half,
            target_width,
            target_height,
            RESAMPLE_FILTER,
        ))
    }

    /// Intermediate size: half of each dimension, truncated, at least 1.
    pub fn half_size(width: u32, height: u32) -> (u32, u32) {
        ((width / 2).max(1), (height / 2).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_same_size_keeps_geometry() {
        let source = RasterImage::from_fn(101, 57, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let out = Resampler::resize(&source, 101, 57).unwrap();
        assert_eq!(out.dimensions(), (101, 57));
        assert_eq!(out.as_raw().len(), 101 * 57 * 4);
    }

    #[test]
    fn test_half_pass_softens_fine_detail() {
        // A one-pixel checkerboard cannot survive a half-size round trip.
        let source = RasterImage::from_fn(32, 32, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let out = Resampler::resize(&source, 32, 32).unwrap();
        assert_ne!(out, source);
        let p = out.get_pixel(16, 16);
        assert!(p[0] > 60 && p[0] < 195, "expected a blended gray, got {:?}", p);
    }

    #[test]
    fn test_flat_color_is_preserved() {
        let source = RasterImage::from_pixel(20, 10, Rgba([12, 200, 77, 255]));
        let out = Resampler::resize(&source, 20, 10).unwrap();
        assert!(out.pixels().all(|p| *p == Rgba([12, 200, 77, 255])));
    }

    #[test]
    fn test_zero_target_rejected() {
        let source = RasterImage::new(4, 4);
        assert!(matches!(
            Resampler::resize(&source, 0, 4),
            Err(PipelineError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Resampler::resize(&source, 4, 0).is_err());
    }

    #[test]
    fn test_single_pixel_source() {
        let source = RasterImage::from_pixel(1, 1, Rgba([9, 8, 7, 255]));
        let out = Resampler::resize(&source, 1, 1).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([9, 8, 7, 255]));
        assert_eq!(Resampler::half_size(1, 3), (1, 1));
    }
}
