// src/processing/libvips/resize.rs

//! Resize and thumbnail geometry on top of libvips operations.

use libvips::{ops, VipsImage};

use super::canvas::centre_on;

type Result<T> = std::result::Result<T, libvips::error::Error>;

/// Scales `image` to exactly `width`×`height`.
///
/// Horizontal and vertical scale are independent, so the aspect ratio follows
/// the target rather than the source.
pub fn resize_exact(image: &VipsImage, width: i32, height: i32) -> Result<VipsImage> {
    let hscale = f64::from(width) / f64::from(image.get_width());
    let vscale = f64::from(height) / f64::from(image.get_height());

    let opts = ops::ResizeOptions {
        vscale,
        ..ops::ResizeOptions::default()
    };

    ops::resize_with_opts(image, hscale, &opts)
}

/// Creates a centred `width`×`height` thumbnail.
///
/// The image is shrunk until it covers the box and the overflow is cropped
/// evenly from both sides. It is never enlarged: a side shorter than the box
/// is centred on a transparent canvas instead.
pub fn thumbnail_centred(image: &VipsImage, width: i32, height: i32) -> Result<VipsImage> {
    use ops::{Interesting, Size, ThumbnailImageOptions};

    let opts = ThumbnailImageOptions {
        height,
        size: Size::Down,
        crop: Interesting::Centre,
        ..ThumbnailImageOptions::default()
    };

    let thumb = ops::thumbnail_image_with_opts(image, width, &opts)?;
    if thumb.get_width() < width || thumb.get_height() < height {
        centre_on(&thumb, width, height)
    } else {
        Ok(thumb)
    }
}

/// Rotates by `degrees` clockwise.
///
/// Right angles use the lossless pixel shuffle; anything else goes through
/// the interpolating rotate and grows the canvas to fit.
pub fn rotate_degrees(image: &VipsImage, degrees: f64) -> Result<VipsImage> {
    let normalized = degrees.rem_euclid(360.0);

    if normalized == 0.0 {
        return ops::copy(image);
    }

    let angle = if normalized == 90.0 {
        Some(ops::Angle::D90)
    } else if normalized == 180.0 {
        Some(ops::Angle::D180)
    } else if normalized == 270.0 {
        Some(ops::Angle::D270)
    } else {
        None
    };

    match angle {
        Some(angle) => ops::rot(image, angle),
        None => ops::rotate(image, normalized),
    }
}
