//! Directory enumeration for bundle categories.

use crate::error::BundleError;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// An immediate directory entry.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Bare entry name, without the parent path.
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// List the immediate entries of `dir` in filesystem-reported order.
///
/// No sorting happens here; deterministic ordering is the collector's
/// responsibility. Fails if `dir` does not exist or is not readable.
pub fn list_entries(dir: &Path) -> Result<Vec<FileEntry>, BundleError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| BundleError::io(dir, into_io_error(e)))?;
        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

fn into_io_error(error: walkdir::Error) -> io::Error {
    let message = error.to_string();
    error
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message))
}
