// src/processing/libvips/header.rs

//! Image header fields as text.
//!
//! `copy_with_opts` always sends every header field to libvips, so an edit
//! starts from the full header of the current image and changes one field.

use std::collections::BTreeMap;

use libvips::ops::{self, BandFormat, Coding, CopyOptions, Interpretation};
use libvips::VipsImage;

use crate::utils::{ConvertError, ConvertResult};

type Result<T> = std::result::Result<T, libvips::error::Error>;

#[derive(Debug, Clone, Copy)]
pub struct Header {
    width: i32,
    height: i32,
    bands: i32,
    format: BandFormat,
    interpretation: Interpretation,
    xres: f64,
    yres: f64,
    xoffset: i32,
    yoffset: i32,
}

const READ_ONLY: &[&str] = &["width", "height", "bands", "format", "interpretation"];

impl Header {
    pub fn of(image: &VipsImage) -> Result<Self> {
        Ok(Self {
            width: image.get_width(),
            height: image.get_height(),
            bands: image.get_bands(),
            format: image.get_format()?,
            interpretation: image.get_interpretation()?,
            xres: image.get_xres(),
            yres: image.get_yres(),
            xoffset: image.get_xoffset(),
            yoffset: image.get_yoffset(),
        })
    }

    /// Every field by its libvips name.
    pub fn fields(&self) -> BTreeMap<String, String> {
        let lower = |value: &dyn std::fmt::Debug| format!("{value:?}").to_lowercase();

        [
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("bands", self.bands.to_string()),
            ("format", lower(&self.format)),
            ("interpretation", lower(&self.interpretation)),
            ("xres", self.xres.to_string()),
            ("yres", self.yres.to_string()),
            ("xoffset", self.xoffset.to_string()),
            ("yoffset", self.yoffset.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }

    /// Sets a writable field (`xres`, `yres`, `xoffset`, `yoffset`) from text.
    pub fn set(&mut self, key: &str, value: &str) -> ConvertResult<()> {
        let invalid = || ConvertError::settings(format!("Invalid value for '{key}': '{value}'"));

        match key {
            "xres" | "yres" => {
                let resolution: f64 = value.trim().parse().map_err(|_| invalid())?;
                if !(resolution.is_finite() && resolution > 0.0) {
                    return Err(invalid());
                }
                if key == "xres" {
                    self.xres = resolution;
                } else {
                    self.yres = resolution;
                }
            }
            "xoffset" => self.xoffset = value.trim().parse().map_err(|_| invalid())?,
            "yoffset" => self.yoffset = value.trim().parse().map_err(|_| invalid())?,
            _ if READ_ONLY.contains(&key) => {
                return Err(ConvertError::settings(format!(
                    "Metadata field '{key}' is read-only"
                )));
            }
            _ => {
                return Err(ConvertError::settings(format!("Unknown metadata field '{key}'")));
            }
        }
        Ok(())
    }

    pub fn set_interpretation(&mut self, interpretation: Interpretation) {
        self.interpretation = interpretation;
    }

    /// A copy of `image` carrying this header.
    pub fn apply(&self, image: &VipsImage) -> Result<VipsImage> {
        let opts = CopyOptions {
            width: self.width,
            height: self.height,
            bands: self.bands,
            format: self.format,
            // `get_coding` in the bindings reports the band format, so only
            // uncoded pixels are passed through.
            coding: Coding::None,
            interpretation: self.interpretation,
            xres: self.xres,
            yres: self.yres,
            xoffset: self.xoffset,
            yoffset: self.yoffset,
        };
        ops::copy_with_opts(image, &opts)
    }
}
