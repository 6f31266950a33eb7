//! Rendering of worksheet documents to output formats.
//!
//! PDF is the primary output; JSON exposes the computed layout for
//! inspection and dry runs.

mod encoding;
mod image;
mod json;
mod options;
mod pdf;

pub use encoding::{encode_win_ansi, is_win_ansi};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use pdf::{to_pdf, write_pdf};

use crate::error::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Zlib-compress a stream for `FlateDecode`.
pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn test_deflate_roundtrip() {
        let data = b"0 0 m 100 0 l S\n".repeat(50);
        let packed = deflate(&data).unwrap();
        assert!(packed.len() < data.len());

        let mut unpacked = Vec::new();
        ZlibDecoder::new(&packed[..]).read_to_end(&mut unpacked).unwrap();
        assert_eq!(unpacked, data);
    }
}
