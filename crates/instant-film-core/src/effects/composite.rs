//! Source-over compositing primitives shared by the effect stages.
//!
//! Colors are straight (non-premultiplied) 0..255 floats with a 0..1 alpha,
//! matching how the overlays are specified.

use image::Rgba;

use crate::types::RasterImage;

/// A translucent color to composite over the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Straight RGB, 0.0..=255.0
    pub rgb: [f32; 3],
    /// Opacity, 0.0..=1.0
    pub alpha: f32,
}

impl Paint {
    pub const TRANSPARENT_BLACK: Paint = Paint::rgba(0, 0, 0, 0.0);

    /// Build a paint from 8-bit channels and an opacity.
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: [r as f32, g as f32, b as f32],
            alpha,
        }
    }

    /// Same color at a different opacity.
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            rgb: self.rgb,
            alpha,
        }
    }
}

/// Composite `paint` over one pixel, scaled by `coverage` (0..1).
pub fn blend_over(pixel: &mut Rgba<u8>, paint: Paint, coverage: f32) {
    let src_a = (paint.alpha * coverage).clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = pixel[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        *pixel = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let blended =
            (paint.rgb[c] * src_a + pixel[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
        pixel[c] = to_channel(blended);
    }
    pixel[3] = to_channel(out_a * 255.0);
}

/// Flat-fill the whole frame with a translucent color.
pub fn fill(image: &mut RasterImage, paint: Paint) {
    for pixel in image.pixels_mut() {
        blend_over(pixel, paint, 1.0);
    }
}

/// Two-stop radial gradient with concentric start and end circles.
///
/// Inside the inner radius the inner paint applies, beyond the outer radius
/// the outer paint applies; in between, stops are interpolated in
/// premultiplied space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: (f32, f32),
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub inner: Paint,
    pub outer: Paint,
}

impl RadialGradient {
    /// Gradient position of a point: 0 at or inside the inner circle, 1 at or
    /// beyond the outer circle.
    pub fn offset_at(&self, x: f32, y: f32) -> f32 {
        let span = self.outer_radius - self.inner_radius;
        if span <= f32::EPSILON {
            return 1.0;
        }
        let distance = (x - self.center.0).hypot(y - self.center.1);
        ((distance - self.inner_radius) / span).clamp(0.0, 1.0)
    }

    /// Interpolated paint at a point.
    pub fn paint_at(&self, x: f32, y: f32) -> Paint {
        let t = self.offset_at(x, y);
        let alpha = lerp(self.inner.alpha, self.outer.alpha, t);
        if alpha <= 0.0 {
            return Paint::TRANSPARENT_BLACK;
        }
        let mut rgb = [0.0; 3];
        for (c, channel) in rgb.iter_mut().enumerate() {
            let premultiplied = lerp(
                self.inner.rgb[c] * self.inner.alpha,
                self.outer.rgb[c] * self.outer.alpha,
                t,
            );
            *channel = premultiplied / alpha;
        }
        Paint { rgb, alpha }
    }
}

/// Composite a radial gradient over the whole frame, sampled at pixel centers.
pub fn fill_radial(image: &mut RasterImage, gradient: &RadialGradient) {
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let paint = gradient.paint_at(x as f32 + 0.5, y as f32 + 0.5);
        blend_over(pixel, paint, 1.0);
    }
}

/// Round and saturate a float channel into a byte.
pub(crate) fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
