//! Image format detection and extension filtering.

use serde::{Deserialize, Serialize};

/// Extensions accepted by the directory scanner (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Raster formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Detect the image format from the first bytes of a file.
///
/// Returns `None` when the data matches neither PNG nor JPEG.
pub fn detect_format_from_bytes(data: &[u8]) -> Option<ImageFormat> {
    if data.starts_with(PNG_MAGIC) {
        Some(ImageFormat::Png)
    } else if data.starts_with(JPEG_MAGIC) {
        Some(ImageFormat::Jpeg)
    } else {
        None
    }
}

/// Check whether a file name carries a supported image extension.
///
/// Matches on the text after the last `.`, ignoring ASCII case, so
/// `scan.PNG` and `photo.Jpeg` are both accepted.
pub fn has_supported_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(detect_format_from_bytes(data), Some(ImageFormat::Png));
    }

    #[test]
    fn test_detect_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(detect_format_from_bytes(&data), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_format_from_bytes(b""), None);
        assert_eq!(detect_format_from_bytes(b"%PDF-1.7"), None);
        assert_eq!(detect_format_from_bytes(b"\x89PN"), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(has_supported_extension("problem_1.png"));
        assert!(has_supported_extension("problem_1.JPG"));
        assert!(has_supported_extension("scan.Jpeg"));
        assert!(has_supported_extension("archive.tar.png"));
        assert!(!has_supported_extension("notes.txt"));
        assert!(!has_supported_extension("png"));
        assert!(!has_supported_extension("image.png.bak"));
        assert!(!has_supported_extension("image.gif"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ImageFormat::Png.to_string(), "PNG");
        assert_eq!(ImageFormat::Jpeg.to_string(), "JPEG");
    }
}
