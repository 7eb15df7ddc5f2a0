//! Colored glow bleeding in from near a corner.

use rand::Rng;

use crate::types::RasterImage;

use super::composite::{fill_radial, Paint, RadialGradient};

pub const RED_LEAK: Paint = Paint::rgba(255, 50, 50, 0.15);
pub const AMBER_LEAK: Paint = Paint::rgba(255, 200, 50, 0.15);

/// Smallest leak radius in pixels.
pub const MIN_LEAK_RADIUS: f32 = 200.0;

/// Placement and color of a single leak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightLeak {
    pub center: (f32, f32),
    pub radius: f32,
    pub paint: Paint,
}

impl LightLeak {
    /// Pick a random leak for a frame of the given size.
    ///
    /// The center lands in `[-0.2w, 0.8w) x [-0.2h, 0.8h)`, the radius in
    /// `[200, 200 + 0.8 * max(w, h))`.
    pub fn random<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        let (w, h) = (width as f32, height as f32);
        let paint = if rng.gen_bool(0.5) {
            RED_LEAK
        } else {
            AMBER_LEAK
        };
        let center = (rng.gen::<f32>() * w - w * 0.2, rng.gen::<f32>() * h - h * 0.2);
        let radius = rng.gen::<f32>() * w.max(h) * 0.8 + MIN_LEAK_RADIUS;
        Self {
            center,
            radius,
            paint,
        }
    }

    pub fn gradient(&self) -> RadialGradient {
        RadialGradient {
            center: self.center,
            inner_radius: 0.0,
            outer_radius: self.radius,
            inner: self.paint,
            outer: Paint::rgba(255, 255, 255, 0.0),
        }
    }

    pub fn render(&self, image: &mut RasterImage) {
        fill_radial(image, &self.gradient());
    }
}

/// Pick and composite one light leak, returning it.
pub fn apply_light_leak<R: Rng + ?Sized>(image: &mut RasterImage, rng: &mut R) -> LightLeak {
    let leak = LightLeak::random(image.width(), image.height(), rng);
    leak.render(image);
    leak
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_leak_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let leak = LightLeak::random(1000, 600, &mut rng);
            assert!((-200.0..800.0).contains(&leak.center.0));
            assert!((-120.0..480.0).contains(&leak.center.1));
            assert!((200.0..1000.0).contains(&leak.radius));
            assert!(leak.paint == RED_LEAK || leak.paint == AMBER_LEAK);
        }
    }

    #[test]
    fn test_leak_tints_near_center_and_spares_far_pixels() {
        let mut image = RasterImage::from_pixel(600, 10, Rgba([0, 0, 0, 255]));
        let leak = LightLeak {
            center: (0.0, 5.0),
            radius: 200.0,
            paint: RED_LEAK,
        };
        leak.render(&mut image);

        let near = image.get_pixel(0, 5);
        assert!(near[0] > near[1], "red leak should dominate, got {:?}", near);
        assert_eq!(image.get_pixel(599, 5).0, [0, 0, 0, 255]);
    }
}
