//! Error types for image conversion.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File path errors.
#[derive(Error, Debug)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
    /// Destination directory is missing
    #[error("Output directory does not exist: {0}")]
    MissingParent(PathBuf),
    /// IO error accessing the path
    #[error("{0}")]
    IO(String),
}

/// Main error type for conversions.
///
/// Every failure is terminal: a conversion either fully succeeds or the
/// caller gets exactly one of these.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The libvips runtime could not be started
    #[error("Initialization error: {0}")]
    Init(String),

    /// Source or destination could not be accessed
    #[error("IO error: {0}")]
    IO(#[from] PathError),

    /// Decoding or encoding failed inside libvips
    #[error("Codec error: {0}")]
    Codec(String),

    /// Invalid settings or operation arguments
    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

// Helper methods for error creation
impl ConvertError {
    pub fn init<T: Into<String>>(msg: T) -> Self {
        Self::Init(msg.into())
    }

    pub fn codec<T: Into<String>>(msg: T) -> Self {
        Self::Codec(msg.into())
    }

    pub fn settings<T: Into<String>>(msg: T) -> Self {
        Self::Settings(msg.into())
    }

    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::IO(PathError::NotFound(path.into()))
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::IO(PathError::NotFile(path.into()))
    }

    pub fn missing_parent(path: impl Into<PathBuf>) -> Self {
        Self::IO(PathError::MissingParent(path.into()))
    }

    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Init(_) => 2,
            Self::IO(_) => 3,
            Self::Codec(_) => 4,
            Self::Settings(_) => 5,
        }
    }
}

// Convert std::io::Error to ConvertError
impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        Self::IO(PathError::from(err))
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}
