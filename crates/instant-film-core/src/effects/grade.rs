//! Color grading: the film look or a grayscale conversion.
//!
//! The film look is the filter chain
//! `sepia(0.3) contrast(1.5) brightness(0.9) saturate(1.2) hue-rotate(-5deg)`,
//! evaluated per pixel on normalized channels with clamping after every step.

use crate::types::RasterImage;

use super::composite::to_channel;

/// Rec. 709 luma weights used by the grayscale conversion.
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// A single color filter primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    /// Blend toward sepia; 0 is identity, 1 is full sepia
    Sepia(f32),
    /// Scale distance from mid-gray
    Contrast(f32),
    /// Multiply all channels
    Brightness(f32),
    /// Scale saturation; 1 is identity
    Saturate(f32),
    /// Rotate hue by the given number of degrees
    HueRotate(f32),
}

/// The fixed film-look chain, applied in order.
pub const FILM_CHAIN: [Filter; 5] = [
    Filter::Sepia(0.3),
    Filter::Contrast(1.5),
    Filter::Brightness(0.9),
    Filter::Saturate(1.2),
    Filter::HueRotate(-5.0),
];

impl Filter {
    /// Apply the filter to a normalized RGB triple, clamping the result.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match *self {
            Filter::Sepia(amount) => {
                let inv = 1.0 - amount.clamp(0.0, 1.0);
                mul(
                    [
                        [0.393 + 0.607 * inv, 0.769 - 0.769 * inv, 0.189 - 0.189 * inv],
                        [0.349 - 0.349 * inv, 0.686 + 0.314 * inv, 0.168 - 0.168 * inv],
                        [0.272 - 0.272 * inv, 0.534 - 0.534 * inv, 0.131 + 0.869 * inv],
                    ],
                    rgb,
                )
            }
            Filter::Contrast(amount) => rgb.map(|c| (c - 0.5) * amount + 0.5),
            Filter::Brightness(amount) => rgb.map(|c| c * amount),
            Filter::Saturate(s) => mul(
                [
                    [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
                ],
                rgb,
            ),
            Filter::HueRotate(degrees) => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                mul(
                    [
                        [
                            0.213 + cos * 0.787 - sin * 0.213,
                            0.715 - cos * 0.715 - sin * 0.715,
                            0.072 - cos * 0.072 + sin * 0.928,
                        ],
                        [
                            0.213 - cos * 0.213 + sin * 0.143,
                            0.715 + cos * 0.285 + sin * 0.140,
                            0.072 - cos * 0.072 - sin * 0.283,
                        ],
                        [
                            0.213 - cos * 0.213 - sin * 0.787,
                            0.715 - cos * 0.715 + sin * 0.715,
                            0.072 + cos * 0.928 + sin * 0.072,
                        ],
                    ],
                    rgb,
                )
            }
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }
}

/// Which color grade the first stage applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorGrade {
    /// Warm, contrasty film look
    #[default]
    Film,
    /// Luminance-only grayscale
    Monochrome,
}

impl ColorGrade {
    pub fn from_monochrome(monochrome: bool) -> Self {
        if monochrome {
            ColorGrade::Monochrome
        } else {
            ColorGrade::Film
        }
    }

    /// Grade every pixel in place. Alpha is left untouched.
    pub fn apply(self, image: &mut RasterImage) {
        for pixel in image.pixels_mut() {
            let rgb = [pixel[0], pixel[1], pixel[2]];
            let graded = match self {
                ColorGrade::Monochrome => {
                    let gray = to_channel(
                        LUMA[0] * rgb[0] as f32 + LUMA[1] * rgb[1] as f32 + LUMA[2] * rgb[2] as f32,
                    );
                    [gray; 3]
                }
                ColorGrade::Film => {
                    let normalized = FILM_CHAIN
                        .iter()
                        .fold(rgb.map(|c| c as f32 / 255.0), |acc, f| f.apply(acc));
                    normalized.map(|c| to_channel(c * 255.0))
                }
            };
            pixel.0[..3].copy_from_slice(&graded);
        }
    }
}

fn mul(m: [[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}
