// src/processing/libvips/adjust.rs

//! Brightness, saturation and hue, applied in LCh space.

use libvips::ops::{self, Interpretation};
use libvips::VipsImage;

type Result<T> = std::result::Result<T, libvips::error::Error>;

/// Scales lightness and chroma and turns the hue by `hue_degrees`.
///
/// Bands past L, C and h (alpha) pass through unchanged. The result is sRGB.
pub fn modulate(
    image: &VipsImage,
    lightness: f64,
    chroma: f64,
    hue_degrees: f64,
) -> Result<VipsImage> {
    let lch = ops::colourspace(image, Interpretation::Lch)?;

    let bands = lch.get_bands() as usize;
    let mut scale = vec![1.0; bands];
    let mut offset = vec![0.0; bands];
    scale[0] = lightness;
    scale[1] = chroma;
    offset[2] = hue_degrees;

    let adjusted = ops::linear(&lch, &mut scale, &mut offset)?;
    ops::colourspace(&adjusted, Interpretation::Srgb)
}
