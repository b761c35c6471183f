// src/processing/libvips/formats.rs

//! Maps quality and metadata settings to libvips format-specific save options.

use libvips::ops::{
    self,
    ForeignKeep, ForeignSubsample, ForeignTiffCompression, ForeignTiffPredictor,
};
use libvips::VipsImage;

use crate::core::QualitySettings;
use crate::utils::{ConvertError, ImageFormat};

type Result<T> = std::result::Result<T, ConvertError>;

const PNG_COMPRESSION: i32 = 6; // 0-9, zlib level
const PNG_EFFORT: i32 = 7;      // palette quantisation effort, 1-10
const WEBP_EFFORT: i32 = 4;

// ── Effective quality helpers ──────────────────────────────────────────────────────────

/// Returns the effective quality for a given format, respecting per-format overrides.
///
/// PNG ignores the global value: it stays lossless unless a PNG override asks
/// for palette quantisation.
fn effective_quality(quality: &QualitySettings, format: ImageFormat) -> u32 {
    match format {
        ImageFormat::JPEG => quality.jpeg.unwrap_or(quality.global),
        ImageFormat::PNG => quality.png.unwrap_or(100),
        ImageFormat::WebP => quality.webp.unwrap_or(quality.global),
        ImageFormat::TIFF => quality.global,
    }
}

/// Returns `true` when the effective quality for a format is 100 (lossless).
fn is_lossless(quality: &QualitySettings, format: ImageFormat) -> bool {
    effective_quality(quality, format) == 100
}

fn keep(strip_metadata: bool) -> ForeignKeep {
    if strip_metadata { ForeignKeep::None } else { ForeignKeep::All }
}

// ── Format save functions ──────────────────────────────────────────────────────────────

/// Saves `image` as JPEG.
///
/// When quality == 100: trellis quantisation, no chroma subsampling.
/// Otherwise: standard optimised JPEG with 4:2:0 subsampling.
pub fn save_jpeg(
    image: &VipsImage,
    output_path: &str,
    quality: &QualitySettings,
    strip_metadata: bool,
) -> Result<()> {
    let q = effective_quality(quality, ImageFormat::JPEG) as i32;
    let lossless = is_lossless(quality, ImageFormat::JPEG);

    let opts = ops::JpegsaveOptions {
        q,
        optimize_coding: true,
        trellis_quant: lossless,
        overshoot_deringing: lossless,
        subsample_mode: if lossless { ForeignSubsample::Off } else { ForeignSubsample::On },
        keep: keep(strip_metadata),
        ..ops::JpegsaveOptions::default()
    };

    ops::jpegsave_with_opts(image, output_path, &opts)
        .map_err(|e| ConvertError::codec(format!("JPEG save failed: {e}")))
}

/// Saves `image` as PNG.
///
/// When quality == 100: lossless (no palette quantisation).
/// Otherwise: palette quantisation at the requested quality.
pub fn save_png(
    image: &VipsImage,
    output_path: &str,
    quality: &QualitySettings,
    strip_metadata: bool,
) -> Result<()> {
    let q = effective_quality(quality, ImageFormat::PNG) as i32;
    let lossless = is_lossless(quality, ImageFormat::PNG);

    let opts = ops::PngsaveOptions {
        compression: PNG_COMPRESSION,
        palette: !lossless,
        q,
        effort: PNG_EFFORT,
        keep: keep(strip_metadata),
        ..ops::PngsaveOptions::default()
    };

    ops::pngsave_with_opts(image, output_path, &opts)
        .map_err(|e| ConvertError::codec(format!("PNG save failed: {e}")))
}

/// Saves `image` as WebP.
///
/// When quality == 100: lossless mode.
pub fn save_webp(
    image: &VipsImage,
    output_path: &str,
    quality: &QualitySettings,
    strip_metadata: bool,
) -> Result<()> {
    let q = effective_quality(quality, ImageFormat::WebP) as i32;
    let lossless = is_lossless(quality, ImageFormat::WebP);

    let opts = ops::WebpsaveOptions {
        q,
        lossless,
        alpha_q: q,
        effort: WEBP_EFFORT,
        keep: keep(strip_metadata),
        ..ops::WebpsaveOptions::default()
    };

    ops::webpsave_with_opts(image, output_path, &opts)
        .map_err(|e| ConvertError::codec(format!("WebP save failed: {e}")))
}

/// Saves `image` as TIFF with deflate compression.
pub fn save_tiff(
    image: &VipsImage,
    output_path: &str,
    quality: &QualitySettings,
    strip_metadata: bool,
) -> Result<()> {
    let q = effective_quality(quality, ImageFormat::TIFF) as i32;

    let opts = ops::TiffsaveOptions {
        compression: ForeignTiffCompression::Deflate,
        predictor: ForeignTiffPredictor::Horizontal,
        q,
        keep: keep(strip_metadata),
        ..ops::TiffsaveOptions::default()
    };

    ops::tiffsave_with_opts(image, output_path, &opts)
        .map_err(|e| ConvertError::codec(format!("TIFF save failed: {e}")))
}

/// Dispatches to the correct format save function based on `format`.
pub fn save_image_as(
    image: &VipsImage,
    output_path: &str,
    format: ImageFormat,
    quality: &QualitySettings,
    strip_metadata: bool,
) -> Result<()> {
    match format {
        ImageFormat::JPEG => save_jpeg(image, output_path, quality, strip_metadata),
        ImageFormat::PNG => save_png(image, output_path, quality, strip_metadata),
        ImageFormat::WebP => save_webp(image, output_path, quality, strip_metadata),
        ImageFormat::TIFF => save_tiff(image, output_path, quality, strip_metadata),
    }
}

/// Saves `image` through libvips' suffix-based saver lookup.
pub fn save_by_suffix(image: &VipsImage, output_path: &str) -> Result<()> {
    image
        .image_write_to_file(output_path)
        .map_err(|e| ConvertError::codec(format!("Save failed: {e}")))
}
