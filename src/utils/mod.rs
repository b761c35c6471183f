pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;
pub mod color;

pub use error::{ConvertError, ConvertResult, PathError};
pub use validation::{validate_conversion, validate_dimensions, validate_quality, validate_settings};
pub use formats::{ImageFormat, format_from_extension};
pub use fs::{
    get_file_size,
    validate_input_path,
    validate_output_path,
};
pub use color::{Rgba, TRANSPARENT, format_color, parse_color};
