use std::path::Path;
use std::str::FromStr;
use crate::utils::ConvertError;

/// Formats with dedicated encoder settings.
///
/// Anything else is handed to libvips' generic writer, which picks a saver
/// from the file suffix on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
    TIFF,
}

impl FromStr for ImageFormat {
    type Err = ConvertError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "webp" => Ok(Self::WebP),
            "tif" | "tiff" => Ok(Self::TIFF),
            _ => Err(ConvertError::codec(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Get format from file extension
pub fn format_from_extension(path: impl AsRef<Path>) -> Result<ImageFormat, ConvertError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ConvertError::codec(
            format!("File has no extension: {}", path.display())
        ))?;

    ImageFormat::from_str(ext)
}
