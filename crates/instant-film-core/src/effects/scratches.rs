//! Random hairline scratches across the emulsion.

use rand::Rng;

use crate::types::RasterImage;

use super::composite::{blend_over, Paint};

/// Number of scratches drawn per frame.
pub const SCRATCH_COUNT: usize = 15;

/// Maximum endpoint offset from the start point, as a fraction of each dimension.
pub const SCRATCH_REACH: f32 = 0.1;

pub const LIGHT_SCRATCH: Paint = Paint::rgba(255, 255, 255, 0.25);
pub const DARK_SCRATCH: Paint = Paint::rgba(0, 0, 0, 0.2);

/// One stroked line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scratch {
    pub start: (f32, f32),
    pub end: (f32, f32),
    /// Stroke width in pixels, 0.5..2.5
    pub width: f32,
    pub paint: Paint,
}

impl Scratch {
    /// Draw a random scratch for a frame of the given size.
    pub fn random<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        let (w, h) = (width as f32, height as f32);
        let paint = if rng.gen_bool(0.5) {
            LIGHT_SCRATCH
        } else {
            DARK_SCRATCH
        };
        let stroke = rng.gen::<f32>() * 2.0 + 0.5;
        let start = (rng.gen::<f32>() * w, rng.gen::<f32>() * h);
        let end = (
            start.0 + (rng.gen::<f32>() - 0.5) * (w * SCRATCH_REACH * 2.0),
            start.1 + (rng.gen::<f32>() - 0.5) * (h * SCRATCH_REACH * 2.0),
        );
        Self {
            start,
            end,
            width: stroke,
            paint,
        }
    }

    /// Anti-aliased stroke with round caps. Pixels outside the frame are clipped.
    pub fn stroke(&self, image: &mut RasterImage) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let half = self.width / 2.0;
        // Hairlines thinner than a pixel fade instead of shrinking.
        let intensity = self.width.min(1.0);
        let pad = half + 1.0;

        let min_x = (self.start.0.min(self.end.0) - pad).floor().max(0.0) as u32;
        let min_y = (self.start.1.min(self.end.1) - pad).floor().max(0.0) as u32;
        let max_x = ((self.start.0.max(self.end.0) + pad).ceil() as i64)
            .clamp(0, image.width() as i64 - 1) as u32;
        let max_y = ((self.start.1.max(self.end.1) + pad).ceil() as i64)
            .clamp(0, image.height() as i64 - 1) as u32;
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let distance = self.distance_to(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (half + 0.5 - distance).clamp(0.0, 1.0) * intensity;
                if coverage > 0.0 {
                    blend_over(image.get_pixel_mut(x, y), self.paint, coverage);
                }
            }
        }
    }

    fn distance_to(&self, px: f32, py: f32) -> f32 {
        let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq <= f32::EPSILON {
            0.0
        } else {
            (((px - self.start.0) * dx + (py - self.start.1) * dy) / len_sq).clamp(0.0, 1.0)
        };
        let (cx, cy) = (self.start.0 + t * dx, self.start.1 + t * dy);
        (px - cx).hypot(py - cy)
    }
}

/// Draw [`SCRATCH_COUNT`] independent scratches and return them.
pub fn apply_scratches<R: Rng + ?Sized>(image: &mut RasterImage, rng: &mut R) -> Vec<Scratch> {
    let (width, height) = image.dimensions();
    let scratches: Vec<Scratch> = (0..SCRATCH_COUNT)
        .map(|_| Scratch::random(width, height, rng))
        .collect();
    for scratch in &scratches {
        scratch.stroke(image);
    }
    scratches
}
