// src/processing/libvips/canvas.rs

//! Canvas-level geometry: blank images, centring on a larger canvas, and
//! removing a band of rows or columns.

use libvips::ops::{self, BandFormat, Direction, Interpretation};
use libvips::VipsImage;

use crate::utils::Rgba;

use super::header::Header;

type Result<T> = std::result::Result<T, libvips::error::Error>;

/// A `width`×`height` sRGB image with alpha, filled with `color`.
pub fn blank_canvas(width: i32, height: i32, color: Rgba) -> Result<VipsImage> {
    let black = ops::black_with_opts(width, height, &ops::BlackOptions { bands: 4 })?;

    let mut scale = [1.0; 4];
    let mut offset = color.map(f64::from);
    let filled = ops::linear(&black, &mut scale, &mut offset)?;
    let pixels = ops::cast(&filled, BandFormat::Uchar)?;

    let mut header = Header::of(&pixels)?;
    header.set_interpretation(Interpretation::Srgb);
    header.apply(&pixels)
}

/// Places `image` in the middle of a transparent `width`×`height` canvas.
///
/// An opaque alpha band is added first when the image has none.
pub fn centre_on(image: &VipsImage, width: i32, height: i32) -> Result<VipsImage> {
    let with_alpha;
    let image = if image.image_hasalpha() {
        image
    } else {
        with_alpha = ops::bandjoin_const(image, &mut [255.0])?;
        &with_alpha
    };

    let opts = ops::GravityOptions {
        extend: ops::Extend::Background,
        background: vec![0.0; image.get_bands() as usize],
    };
    ops::gravity_with_opts(image, ops::CompassDirection::Centre, width, height, &opts)
}

/// Removes columns `x..x + width` and rows `y..y + height`, closing the gaps.
///
/// A zero `width` or `height` leaves that axis alone. The caller keeps the
/// region inside the image and never removes a whole axis.
pub fn chop(image: &VipsImage, x: i32, y: i32, width: i32, height: i32) -> Result<VipsImage> {
    let narrowed = remove_span(image, x, width, Direction::Horizontal)?;
    remove_span(&narrowed, y, height, Direction::Vertical)
}

fn remove_span(image: &VipsImage, start: i32, len: i32, direction: Direction) -> Result<VipsImage> {
    if len == 0 {
        return ops::copy(image);
    }

    let (extent, across) = match direction {
        Direction::Vertical => (image.get_height(), image.get_width()),
        _ => (image.get_width(), image.get_height()),
    };
    let end = start + len;

    let piece = |from: i32, to: i32| match direction {
        Direction::Vertical => ops::extract_area(image, 0, from, across, to - from),
        _ => ops::extract_area(image, from, 0, to - from, across),
    };

    match (start > 0, end < extent) {
        (true, true) => ops::join(&piece(0, start)?, &piece(end, extent)?, direction),
        (true, false) => piece(0, start),
        (false, true) => piece(end, extent),
        (false, false) => ops::copy(image),
    }
}
