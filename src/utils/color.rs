//! Background colours given as text.
//!
//! Accepts `none`/`transparent`, `#rgb`, `#rrggbb` and `#rrggbbaa`.

use crate::utils::{ConvertError, ConvertResult};

/// 8-bit red, green, blue and alpha.
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Parses a colour name or hex code.
pub fn parse_color(color: &str) -> ConvertResult<Rgba> {
    let color = color.trim();
    if color.eq_ignore_ascii_case("none") || color.eq_ignore_ascii_case("transparent") {
        return Ok(TRANSPARENT);
    }

    let invalid = || ConvertError::settings(format!("Invalid colour: '{color}'"));
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

    match hex.len() {
        3 => {
            let mut rgba = [255; 4];
            for (i, digit) in hex.char_indices() {
                let value = channel(&hex[i..i + digit.len_utf8()])?;
                rgba[i] = value * 17;
            }
            Ok(rgba)
        }
        6 | 8 => {
            let mut rgba = [255; 4];
            for (slot, i) in rgba.iter_mut().zip((0..hex.len()).step_by(2)) {
                *slot = channel(&hex[i..i + 2])?;
            }
            Ok(rgba)
        }
        _ => Err(invalid()),
    }
}

/// Hex form of `rgba`; the alpha pair is only written when not opaque.
pub fn format_color(rgba: Rgba) -> String {
    let [r, g, b, a] = rgba;
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}
