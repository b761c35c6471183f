//! Core types for conversion settings and results.

use serde::{Deserialize, Serialize};
use crate::utils::{ConvertError, ConvertResult};

/// Encoder quality used when nothing more specific is requested.
pub const DEFAULT_QUALITY: u32 = 90;

/// Configuration settings for a conversion.
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration and reproduces a plain read-then-write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    /// Quality settings for lossy encoders
    pub quality: QualitySettings,
    /// Rotate/flip according to EXIF orientation after reading
    #[serde(rename = "autoOrient")]
    pub auto_orient: bool,
    /// Drop EXIF/XMP/ICC metadata when writing
    #[serde(rename = "stripMetadata")]
    pub strip_metadata: bool,
}

/// Quality settings for image compression.
///
/// Allows setting a global quality level and format-specific overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitySettings {
    /// Global quality level (1-100) applied when format-specific is not set
    pub global: u32,
    /// JPEG-specific quality override
    pub jpeg: Option<u32>,
    /// PNG-specific quality override; below 100 enables palette quantisation
    pub png: Option<u32>,
    /// WebP-specific quality override
    pub webp: Option<u32>,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            global: DEFAULT_QUALITY,
            jpeg: None,
            png: None,
            webp: None,
        }
    }
}

impl ConvertSettings {
    /// Parses settings from a JSON document.
    pub fn from_json(json: &str) -> ConvertResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ConvertError::settings(format!("Invalid settings JSON: {e}")))
    }
}

/// Result of a single conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Path to the source file
    #[serde(rename = "sourcePath")]
    pub source_path: String,
    /// Path to the written file
    #[serde(rename = "destinationPath")]
    pub destination_path: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of bands (3 for RGB, 4 for RGBA, ...)
    pub bands: u32,
    /// Source file size in bytes
    #[serde(rename = "sourceSize")]
    pub source_size: u64,
    /// Destination file size in bytes
    #[serde(rename = "destinationSize")]
    pub destination_size: u64,
}
