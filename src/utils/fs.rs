use std::path::Path;
use crate::utils::{ConvertError, ConvertResult};

/// Get file size in bytes
pub fn get_file_size(path: impl AsRef<Path>) -> ConvertResult<u64> {
    Ok(std::fs::metadata(path.as_ref())?.len())
}

/// Checks that `path` names an existing regular file.
pub fn validate_input_path(path: impl AsRef<Path>) -> ConvertResult<()> {
    let path = path.as_ref();

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConvertError::not_found(path));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_file() {
        return Err(ConvertError::not_a_file(path));
    }

    Ok(())
}

/// Checks that the directory `path` would be written into exists.
pub fn validate_output_path(path: impl AsRef<Path>) -> ConvertResult<()> {
    let path = path.as_ref();

    if path.is_dir() {
        return Err(ConvertError::not_a_file(path));
    }

    // A bare file name has an empty parent, meaning the working directory.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(ConvertError::missing_parent(parent));
        }
    }

    Ok(())
}
