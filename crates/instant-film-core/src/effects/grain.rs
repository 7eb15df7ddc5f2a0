//! Monochromatic film grain.

use rand::Rng;

use crate::types::RasterImage;

use super::composite::to_channel;

/// Peak-to-peak amplitude of the per-pixel noise, in 8-bit levels.
pub const GRAIN_AMPLITUDE: f32 = 45.0;

/// One noise sample, uniform over `[-22.5, 22.5)`.
pub fn grain_sample<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.gen::<f32>() - 0.5) * GRAIN_AMPLITUDE
}

/// Add one noise draw per pixel to R, G and B alike, saturating at 0 and 255.
pub fn apply_grain<R: Rng + ?Sized>(image: &mut RasterImage, rng: &mut R) {
    for pixel in image.pixels_mut() {
        let noise = grain_sample(rng);
        for channel in pixel.0[..3].iter_mut() {
            *channel = to_channel(*channel as f32 + noise);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_delta_on_every_color_channel() {
        let mut image = RasterImage::from_pixel(32, 32, Rgba([90, 95, 100, 77]));
        let mut rng = StdRng::seed_from_u64(7);
        apply_grain(&mut image, &mut rng);

        for p in image.pixels() {
            let delta = p[0] as i32 - 90;
            assert_eq!(p[1] as i32 - 95, delta);
            assert_eq!(p[2] as i32 - 100, delta);
            assert!(delta.abs() <= 23);
            assert_eq!(p[3], 77);
        }
    }

    #[test]
    fn test_saturates_at_bounds() {
        // StepRng(0, 0) always yields 0.0, the most negative noise value.
        let mut dark = RasterImage::from_pixel(4, 4, Rgba([5, 10, 20, 255]));
        apply_grain(&mut dark, &mut StepRng::new(0, 0));
        assert!(dark.pixels().all(|p| p.0 == [0, 0, 0, 255]));

        // u64::MAX yields the largest float below 1.0.
        let mut bright = RasterImage::from_pixel(4, 4, Rgba([250, 240, 250, 255]));
        apply_grain(&mut bright, &mut StepRng::new(u64::MAX, 0));
        assert!(bright.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_sample_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let sample = grain_sample(&mut rng);
            assert!((-22.5..22.5).contains(&sample));
        }
    }
}
