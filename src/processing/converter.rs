// src/processing/converter.rs

//! The conversion driver: read one file, write it back out in another format.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::{ConversionReport, ConvertSettings, Runtime};
use crate::utils::{ConvertResult, get_file_size, validate_conversion};

/// Program name registered with libvips.
pub const APP_NAME: &str = "image-convert";

/// Converts `source` to `destination` on an already initialized runtime.
///
/// The destination format follows its extension. Nothing is written when the
/// source is missing or the settings are invalid.
pub fn convert(
    runtime: &mut Runtime,
    source: &Path,
    destination: &Path,
    settings: &ConvertSettings,
) -> ConvertResult<ConversionReport> {
    validate_conversion(source, destination, settings)?;

    let source_size = get_file_size(source)?;

    let mut image = runtime.open(source)?;
    image.apply_settings(settings);

    if settings.auto_orient {
        image.auto_orient()?;
    }

    image.write(destination)?;

    let report = ConversionReport {
        source_path: source.display().to_string(),
        destination_path: destination.display().to_string(),
        width: image.width(),
        height: image.height(),
        bands: image.bands(),
        source_size,
        destination_size: get_file_size(destination)?,
    };

    if let Ok(json) = serde_json::to_string(&report) {
        debug!("Conversion report: {json}");
    }

    Ok(report)
}

/// Runs one conversion with its own runtime.
///
/// Initializes libvips, converts, and tears libvips down again on every
/// path. Because libvips cannot be restarted, this can succeed at most once
/// per process.
pub fn run(
    source: &Path,
    destination: &Path,
    settings: &ConvertSettings,
) -> ConvertResult<ConversionReport> {
    let mut runtime = Runtime::init(APP_NAME)?;

    info!("Converting '{}' → '{}'", source.display(), destination.display());
    let result = convert(&mut runtime, source, destination, settings);

    if let Err(e) = &result {
        warn!("Conversion of '{}' failed: {}", source.display(), e);
    }

    runtime.shutdown();
    result
}
