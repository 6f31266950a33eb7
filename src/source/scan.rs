//! Directory scanning.

use super::derive_title;
use crate::detect::has_supported_extension;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One image discovered in the input directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Display title derived from the file name
    pub title: String,

    /// Full path to the image file, exactly as listed in the directory
    pub path: PathBuf,

    /// File name for display; invalid UTF-8 is replaced with U+FFFD
    pub file_name: String,
}

impl ImageEntry {
    /// Build an entry for the image at `path`.
    ///
    /// The path is kept as given so files whose names are not valid UTF-8
    /// can still be opened; only the title and display name are lossy.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            title: derive_title(&file_name),
            path,
            file_name,
        }
    }
}

/// List the supported images in `dir`, sorted by file name.
///
/// # Errors
///
/// * `Error::InvalidDirectory` if `dir` is not a directory
/// * `Error::EmptyInput` if no file carries a supported extension
///
/// # Example
///
/// ```no_run
/// use worksheet::source::scan_dir;
///
/// for entry in scan_dir("./problems")? {
///     println!("{} <- {}", entry.title, entry.file_name);
/// }
/// # Ok::<(), worksheet::Error>(())
/// ```
pub fn scan_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<ImageEntry>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidDirectory(dir.to_path_buf()));
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !has_supported_extension(&name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        // Follows symlinks, so a link to an image counts as a file.
        if !path.is_file() {
            log::debug!("Skipping non-file entry {}", path.display());
            continue;
        }
        found.push((name, path));
    }

    if found.is_empty() {
        return Err(Error::EmptyInput(dir.to_path_buf()));
    }

    // Raw name bytes; for UTF-8 names this equals code point order.
    found.sort_by(|a, b| a.0.cmp(&b.0));
    log::debug!("Found {} images in {}", found.len(), dir.display());

    Ok(found
        .into_iter()
        .map(|(_, path)| ImageEntry::from_path(path))
        .collect())
}
