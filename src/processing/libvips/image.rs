// src/processing/libvips/image.rs

//! The image handle.
//!
//! An [`Image`] starts empty, is populated by [`Image::read`], and is written
//! out by [`Image::write`]. Transforms replace the held image in place.
//! Dropping the handle releases the image.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use libvips::{ops, VipsImage};

use crate::core::{ConvertSettings, QualitySettings, Runtime};
use crate::utils::{
    ConvertError, ConvertResult, PathError, Rgba, TRANSPARENT, format_color, format_from_extension,
    parse_color, validate_dimensions, validate_input_path, validate_output_path, validate_quality,
};

use super::adjust::modulate;
use super::canvas::{blank_canvas, chop};
use super::formats::{save_by_suffix, save_image_as};
use super::header::Header;
use super::resize::{resize_exact, rotate_degrees, thumbnail_centred};

/// A single in-memory image, owned exclusively by its holder.
pub struct Image<'rt> {
    runtime: &'rt mut Runtime,
    inner: Option<VipsImage>,
    quality: QualitySettings,
    strip_metadata: bool,
    background: Rgba,
}

fn path_str(path: &Path) -> ConvertResult<&str> {
    path.to_str().ok_or_else(|| {
        ConvertError::IO(PathError::IO(format!(
            "Path is not valid UTF-8: {}",
            path.display()
        )))
    })
}

impl<'rt> Image<'rt> {
    pub(crate) fn new(runtime: &'rt mut Runtime) -> Self {
        debug!("Image handle acquired");
        Self {
            runtime,
            inner: None,
            quality: QualitySettings::default(),
            strip_metadata: false,
            background: TRANSPARENT,
        }
    }

    // ── Reading and writing ──────────────────────────────────────────────────────────

    /// Decodes `path` into this handle, replacing any image already held.
    ///
    /// The format is detected by libvips from the file contents. The whole
    /// image is decoded into memory, so a handle may be written back over
    /// the file it was read from.
    pub fn read(&mut self, path: impl AsRef<Path>) -> ConvertResult<()> {
        let path = path.as_ref();
        validate_input_path(path)?;

        // Truncated data is a decode error, and the pixels are decoded here
        // so nothing fails later inside a write.
        let image = VipsImage::new_from_file(&format!("{}[fail_on=truncated]", path_str(path)?))
            .and_then(VipsImage::image_copy_memory)
            .map_err(|e| {
                self.codec_error(format!("Could not open image '{}': {e}", path.display()))
            })?;

        debug!(
            "Loaded '{}': {}×{} ({} bands)",
            path.display(),
            image.get_width(),
            image.get_height(),
            image.get_bands()
        );

        self.inner = Some(image);
        Ok(())
    }

    /// Encodes the held image to `path`.
    ///
    /// The format follows the destination extension. JPEG, PNG, WebP and TIFF
    /// honour the handle's quality and metadata settings; other extensions
    /// are left to libvips' own saver lookup.
    pub fn write(&self, path: impl AsRef<Path>) -> ConvertResult<()> {
        let path = path.as_ref();
        let image = self.loaded()?;
        validate_output_path(path)?;
        let filename = path_str(path)?;

        let saved = match format_from_extension(path) {
            Ok(format) => {
                save_image_as(image, filename, format, &self.quality, self.strip_metadata)
            }
            Err(_) => save_by_suffix(image, filename),
        };

        saved.map_err(|e| match e {
            ConvertError::Codec(msg) => {
                self.codec_error(format!("Could not write '{}': {msg}", path.display()))
            }
            other => other,
        })?;

        debug!("Wrote '{}'", path.display());
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────────────────

    /// Whether an image has been read into this handle.
    pub fn is_loaded(&self) -> bool {
        self.inner.is_some()
    }

    /// Width in pixels, or 0 for an empty handle.
    pub fn width(&self) -> u32 {
        self.inner.as_ref().map_or(0, |i| i.get_width() as u32)
    }

    /// Height in pixels, or 0 for an empty handle.
    pub fn height(&self) -> u32 {
        self.inner.as_ref().map_or(0, |i| i.get_height() as u32)
    }

    /// Number of bands, or 0 for an empty handle.
    pub fn bands(&self) -> u32 {
        self.inner.as_ref().map_or(0, |i| i.get_bands() as u32)
    }

    /// Band values of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> ConvertResult<Vec<f64>> {
        let image = self.loaded()?;
        if x >= self.width() || y >= self.height() {
            return Err(ConvertError::codec(format!(
                "Pixel ({x}, {y}) is outside the {}×{} image",
                self.width(),
                self.height()
            )));
        }

        ops::getpoint(image, x as i32, y as i32)
            .map_err(|e| self.codec_error(format!("Could not read pixel ({x}, {y}): {e}")))
    }

    /// Header fields of the held image by libvips name (`width`, `format`,
    /// `interpretation`, `xres`, ...).
    pub fn metadata(&self) -> ConvertResult<BTreeMap<String, String>> {
        let image = self.loaded()?;
        Header::of(image)
            .map(|header| header.fields())
            .map_err(|e| self.codec_error(format!("Could not read image header: {e}")))
    }

    /// Sets one writable header field: `xres`, `yres` (pixels per mm),
    /// `xoffset` or `yoffset`.
    pub fn set_metadata(&mut self, key: &str, value: &str) -> ConvertResult<()> {
        let image = self.loaded()?;
        let mut header = Header::of(image)
            .map_err(|e| self.codec_error(format!("Could not read image header: {e}")))?;
        header.set(key, value)?;

        self.transform("set metadata", |image| header.apply(image))
    }

    // ── Encoder settings ─────────────────────────────────────────────────────────────

    /// Sets the global encoder quality (1-100).
    pub fn set_quality(&mut self, quality: u32) -> ConvertResult<()> {
        validate_quality(quality)?;
        self.quality.global = quality;
        Ok(())
    }

    /// The global encoder quality.
    pub fn quality(&self) -> u32 {
        self.quality.global
    }

    /// Whether writes drop EXIF/XMP/ICC metadata.
    pub fn set_strip_metadata(&mut self, strip: bool) {
        self.strip_metadata = strip;
    }

    /// Copies the encoder settings from `settings`.
    pub fn apply_settings(&mut self, settings: &ConvertSettings) {
        self.quality = settings.quality.clone();
        self.strip_metadata = settings.strip_metadata;
    }

    /// Sets the colour used by [`Image::blank`]: `none` or a `#rgb`,
    /// `#rrggbb` or `#rrggbbaa` hex code.
    pub fn set_background_color(&mut self, color: &str) -> ConvertResult<()> {
        self.background = parse_color(color)?;
        Ok(())
    }

    /// The background colour as hex.
    pub fn background_color(&self) -> String {
        format_color(self.background)
    }

    // ── Transforms ───────────────────────────────────────────────────────────────────

    /// Mirrors top to bottom.
    pub fn flip(&mut self) -> ConvertResult<()> {
        self.transform("flip image", |image| ops::flip(image, ops::Direction::Vertical))
    }

    /// Mirrors left to right.
    pub fn flop(&mut self) -> ConvertResult<()> {
        self.transform("flop image", |image| ops::flip(image, ops::Direction::Horizontal))
    }

    /// Rotates by `degrees` clockwise.
    pub fn rotate(&mut self, degrees: f64) -> ConvertResult<()> {
        if !degrees.is_finite() {
            return Err(ConvertError::settings(format!("Invalid rotation angle: {degrees}")));
        }
        self.transform("rotate image", |image| rotate_degrees(image, degrees))
    }

    /// Turns the image upright according to its EXIF orientation tag.
    pub fn auto_orient(&mut self) -> ConvertResult<()> {
        self.transform("orient image", ops::autorot)
    }

    /// Keeps only the `width`×`height` region whose top-left corner is (`x`, `y`).
    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> ConvertResult<()> {
        validate_dimensions(width, height)?;
        self.loaded()?;

        let fits_x = x.checked_add(width).is_some_and(|right| right <= self.width());
        let fits_y = y.checked_add(height).is_some_and(|bottom| bottom <= self.height());
        if !fits_x || !fits_y {
            return Err(ConvertError::codec(format!(
                "Crop region {width}×{height}+{x}+{y} exceeds the {}×{} image",
                self.width(),
                self.height()
            )));
        }

        self.transform("crop image", |image| {
            ops::extract_area(image, x as i32, y as i32, width as i32, height as i32)
        })
    }

    /// Scales to exactly `width`×`height`.
    pub fn resize(&mut self, width: u32, height: u32) -> ConvertResult<()> {
        validate_dimensions(width, height)?;
        self.transform("resize image", |image| {
            resize_exact(image, width as i32, height as i32)
        })
    }

    /// Creates a centred thumbnail of exactly `width`×`height`.
    pub fn thumbnail(&mut self, width: u32, height: u32) -> ConvertResult<()> {
        validate_dimensions(width, height)?;
        self.transform("create thumbnail", |image| {
            thumbnail_centred(image, width as i32, height as i32)
        })
    }

    /// Gaussian blur with standard deviation `sigma`.
    pub fn blur(&mut self, sigma: f64) -> ConvertResult<()> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ConvertError::settings(format!(
                "Blur sigma must be positive, got {sigma}"
            )));
        }
        self.transform("blur image", |image| ops::gaussblur(image, sigma))
    }

    /// Replaces the held image (if any) with a `width`×`height` canvas in the
    /// background colour.
    pub fn blank(&mut self, width: u32, height: u32) -> ConvertResult<()> {
        validate_dimensions(width, height)?;
        let image = blank_canvas(width as i32, height as i32, self.background)
            .map_err(|e| self.codec_error(format!("Could not create blank image: {e}")))?;

        debug!("Blank canvas {width}×{height} in {}", self.background_color());
        self.inner = Some(image);
        Ok(())
    }

    /// Removes the `width` columns from `x` and the `height` rows from `y`,
    /// shifting the rest of the image into the gap.
    ///
    /// Either size may be 0 to leave that axis untouched.
    pub fn chop(&mut self, x: u32, y: u32, width: u32, height: u32) -> ConvertResult<()> {
        if width == 0 && height == 0 {
            return Err(ConvertError::settings("Chop needs a non-zero width or height"));
        }
        self.loaded()?;

        let keeps_x = width == 0
            || (width < self.width()
                && x.checked_add(width).is_some_and(|right| right <= self.width()));
        let keeps_y = height == 0
            || (height < self.height()
                && y.checked_add(height).is_some_and(|bottom| bottom <= self.height()));
        if !keeps_x || !keeps_y {
            return Err(ConvertError::codec(format!(
                "Chop region {width}×{height}+{x}+{y} does not leave part of the {}×{} image",
                self.width(),
                self.height()
            )));
        }

        self.transform("chop image", |image| {
            chop(image, x as i32, y as i32, width as i32, height as i32)
        })
    }

    /// Brightens (`factor` > 0) or darkens (< 0) the image. `factor` is
    /// clamped to -1..=1; -1 is black.
    pub fn set_brightness(&mut self, factor: f64) -> ConvertResult<()> {
        let factor = modulation_factor("brightness", factor)?;
        // Darkening fades chroma with lightness so that -1 reaches black.
        let lightness = 1.0 + factor;
        let chroma = lightness.min(1.0);
        self.transform("set brightness", |image| modulate(image, lightness, chroma, 0.0))
    }

    /// Raises or lowers colour saturation. `factor` is clamped to -1..=1;
    /// -1 is greyscale.
    pub fn set_saturation(&mut self, factor: f64) -> ConvertResult<()> {
        let factor = modulation_factor("saturation", factor)?;
        self.transform("set saturation", |image| modulate(image, 1.0, 1.0 + factor, 0.0))
    }

    /// Turns the hue. `factor` is clamped to -1..=1, where ±1 is half a turn.
    pub fn set_hue(&mut self, factor: f64) -> ConvertResult<()> {
        let factor = modulation_factor("hue", factor)?;
        self.transform("set hue", |image| modulate(image, 1.0, 1.0, factor * 180.0))
    }

    // ── Helpers ──────────────────────────────────────────────────────────────────────

    fn loaded(&self) -> ConvertResult<&VipsImage> {
        self.inner
            .as_ref()
            .ok_or_else(|| ConvertError::codec("no image loaded"))
    }

    /// Runs a libvips operation on the held image and keeps its output.
    fn transform<F>(&mut self, what: &str, op: F) -> ConvertResult<()>
    where
        F: FnOnce(&VipsImage) -> Result<VipsImage, libvips::error::Error>,
    {
        let image = self.loaded()?;
        let next = op(image).map_err(|e| self.codec_error(format!("Could not {what}: {e}")))?;

        debug!("{what}: now {}×{}", next.get_width(), next.get_height());
        self.inner = Some(next);
        Ok(())
    }

    /// Builds a codec error, appending whatever libvips left in its error buffer.
    fn codec_error(&self, msg: String) -> ConvertError {
        match self.runtime.take_error() {
            Some(detail) => ConvertError::codec(format!("{msg}: {detail}")),
            None => ConvertError::codec(msg),
        }
    }
}

fn modulation_factor(what: &str, factor: f64) -> ConvertResult<f64> {
    if !factor.is_finite() {
        return Err(ConvertError::settings(format!("Invalid {what} factor: {factor}")));
    }
    Ok(factor.clamp(-1.0, 1.0))
}

impl Drop for Image<'_> {
    fn drop(&mut self) {
        debug!("Image handle released");
    }
}
