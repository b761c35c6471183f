// Module declarations in dependency order
pub mod core;
pub mod processing;
pub mod utils;

// Public exports for external consumers
pub use crate::core::{ConversionReport, ConvertSettings, QualitySettings, Runtime};
pub use processing::{APP_NAME, Image, convert, run};
pub use utils::{ConvertError, ConvertResult, ImageFormat, PathError};

// This library file is the public API for consuming this crate as a library.
// The conversion program itself is in main.rs.
