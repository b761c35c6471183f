//! Core types and runtime lifecycle.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`Runtime`]: The process-wide libvips runtime
//! - [`ConvertSettings`]: Configuration for a conversion
//! - [`ConversionReport`]: Result of a conversion

mod runtime;
mod types;

pub use runtime::Runtime;
pub use types::{ConvertSettings, QualitySettings, ConversionReport, DEFAULT_QUALITY};
