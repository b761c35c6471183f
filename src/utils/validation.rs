use std::path::Path;
use crate::core::{ConvertSettings, QualitySettings};
use crate::utils::{ConvertError, ConvertResult, validate_input_path, validate_output_path};

/// Validates a conversion request before the runtime touches any file
pub fn validate_conversion(
    source: &Path,
    destination: &Path,
    settings: &ConvertSettings,
) -> ConvertResult<()> {
    validate_settings(settings)?;
    validate_input_path(source)?;
    validate_output_path(destination)?;
    Ok(())
}

/// Validates conversion settings
pub fn validate_settings(settings: &ConvertSettings) -> ConvertResult<()> {
    validate_quality_settings(&settings.quality)
}

fn validate_quality_settings(quality: &QualitySettings) -> ConvertResult<()> {
    validate_quality(quality.global)?;

    for q in [quality.jpeg, quality.png, quality.webp].into_iter().flatten() {
        validate_quality(q)?;
    }

    Ok(())
}

/// Validates a single quality value
pub fn validate_quality(quality: u32) -> ConvertResult<()> {
    if quality == 0 || quality > 100 {
        return Err(ConvertError::settings(
            format!("Invalid quality value: {}. Must be between 1 and 100", quality)
        ));
    }
    Ok(())
}

/// Validates a target size for crop, resize and thumbnail
pub fn validate_dimensions(width: u32, height: u32) -> ConvertResult<()> {
    if width == 0 {
        return Err(ConvertError::settings("Width cannot be 0"));
    }
    if height == 0 {
        return Err(ConvertError::settings("Height cannot be 0"));
    }
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(ConvertError::settings(
            format!("Dimensions {}x{} are too large", width, height)
        ));
    }
    Ok(())
}
