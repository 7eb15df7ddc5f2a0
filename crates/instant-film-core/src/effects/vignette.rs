//! Corner darkening.

use crate::types::RasterImage;

use super::composite::{fill_radial, Paint, RadialGradient};

/// Opacity of the black reached at the outer radius.
pub const VIGNETTE_OPACITY: f32 = 0.5;

/// How far past the half-width the outer radius reaches, as a fraction of width.
pub const VIGNETTE_REACH: f32 = 0.8;

/// Gradient for a frame: transparent inside `min(w, h) / 3`, half-opaque black
/// at `w / 2 + 0.8 * w`.
pub fn vignette_gradient(width: u32, height: u32) -> RadialGradient {
    let (w, h) = (width as f32, height as f32);
    RadialGradient {
        center: (w / 2.0, h / 2.0),
        inner_radius: w.min(h) / 3.0,
        outer_radius: w / 2.0 + w * VIGNETTE_REACH,
        inner: Paint::TRANSPARENT_BLACK,
        outer: Paint::rgba(0, 0, 0, VIGNETTE_OPACITY),
    }
}

pub fn apply_vignette(image: &mut RasterImage) {
    let gradient = vignette_gradient(image.width(), image.height());
    fill_radial(image, &gradient);
}
