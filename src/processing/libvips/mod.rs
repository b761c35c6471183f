// src/processing/libvips/mod.rs

//! Image handle and codec plumbing on top of libvips-rs.
//!
//! # Architecture
//!
//! - [`Image`]: The handle; read, transform, write.
//! - [`formats`]: Maps `QualitySettings` to format-specific `ops::*save_with_opts` calls.
//! - [`resize`]: Resize, thumbnail and rotation geometry.
//! - [`canvas`]: Blank canvases, centring and chop.
//! - [`adjust`]: Brightness, saturation and hue.
//! - [`header`]: Header fields exposed as metadata.

mod adjust;
mod canvas;
mod formats;
mod header;
mod image;
mod resize;

pub use image::Image;
