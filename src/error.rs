//! Error types for worksheet library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for worksheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compiling a worksheet.
///
/// Every variant is terminal for a run: nothing is retried and no
/// output file is left behind.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not resolve to a directory.
    #[error("{} is not a valid directory", .0.display())]
    InvalidDirectory(PathBuf),

    /// No files with a supported image extension were found.
    #[error("No images found in {}", .0.display())]
    EmptyInput(PathBuf),

    /// An image could not be opened, decoded, or has no usable width.
    #[error("Invalid image {}: {reason}", path.display())]
    InvalidImage {
        /// Path of the offending image (empty for in-memory data)
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// The finished document could not be written to its destination.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Layout constants that would make page layout undefined.
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering (PDF, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create an `InvalidImage` error for the given path.
    pub fn invalid_image(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidImage {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
