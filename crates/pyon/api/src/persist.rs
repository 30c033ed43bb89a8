//! Saving canonical text to disk and loading it back.

use std::fs;
use std::path::Path;

use tracing::info;

use pyon_codec::{ClassRegistry, EncodeOptions};
use pyon_types::Value;

use crate::config::DEFAULT_EXTENSION;
use crate::error::{PyonError, Result};

/// Encode `value` and write it to `path`, creating parent directories.
///
/// The value is encoded before the destination is checked, so an encode
/// failure never touches the filesystem. Returns the written text.
pub fn to_file(value: &Value, path: impl AsRef<Path>, options: EncodeOptions) -> Result<String> {
    save(value, path.as_ref(), options, DEFAULT_EXTENSION)
}

/// Read and decode `path`. `Ok(None)` when `path` is not an existing file.
pub fn from_file(path: impl AsRef<Path>, registry: &ClassRegistry) -> Result<Option<Value>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    crate::decode(&text, registry).map(Some)
}

pub(crate) fn save(
    value: &Value,
    path: &Path,
    options: EncodeOptions,
    extension: &str,
) -> Result<String> {
    let text = crate::encode(value, options)?;
    check_destination(path, extension)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &text)?;
    info!(path = %path.display(), bytes = text.len(), "Data saved");
    Ok(text)
}

fn check_destination(path: &Path, extension: &str) -> Result<()> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension);
    if path.as_os_str().is_empty() || !matches {
        return Err(PyonError::InvalidDestination(path.display().to_string()));
    }
    Ok(())
}
