//! File helpers for report inputs.

use std::{fs, io::ErrorKind, path::Path};

use crate::lib::errors::SourceError;

/// Returns true if `path` exists and is a regular file (symlinks followed).
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Read a report file as UTF-8 text.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_report(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Read a report that may have disappeared since it was resolved.
///
/// Returns `Ok(None)` for `NotFound` so callers can apply the missing-input policy.
pub fn read_report_if_present(path: &Path) -> Result<Option<String>, SourceError> {
    match read_report(path) {
        Ok(text) => Ok(Some(text)),
        Err(SourceError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
