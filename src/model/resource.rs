//! Image resources embedded in the document.

use crate::detect::{detect_format_from_bytes, ImageFormat};
use crate::error::{Error, Result};
use crate::preprocess::{trim_whitespace, TrimOptions};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// A loaded image ready to be embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Encoded pixel payload
    #[serde(skip)]
    pub pixels: PixelData,

    /// Format of the source file
    pub format: ImageFormat,

    /// Original filename if known
    pub filename: Option<String>,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

/// Pixel payload in the form the PDF encoder embeds it.
#[derive(Debug, Clone)]
pub enum PixelData {
    /// An untouched baseline or progressive JPEG stream.
    Jpeg { data: Vec<u8>, color: JpegColor },

    /// Uncompressed 8-bit samples, row-major.
    Raw {
        channels: ColorChannels,
        samples: Vec<u8>,
        /// One 8-bit alpha sample per pixel, if the source had alpha
        alpha: Option<Vec<u8>>,
    },
}

impl Default for PixelData {
    fn default() -> Self {
        PixelData::Raw {
            channels: ColorChannels::Rgb,
            samples: Vec::new(),
            alpha: None,
        }
    }
}

/// Color model of a pass-through JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColor {
    Gray,
    Rgb,
}

/// Color model of raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannels {
    Gray,
    Rgb,
}

impl ColorChannels {
    /// Samples per pixel.
    pub fn count(&self) -> usize {
        match self {
            ColorChannels::Gray => 1,
            ColorChannels::Rgb => 3,
        }
    }
}

impl Resource {
    /// Open and prepare the image at `path`.
    ///
    /// The file is read fully and closed before returning. With `trim`
    /// set, white borders and long blank gaps are removed first.
    ///
    /// # Errors
    ///
    /// `Error::InvalidImage` if the file cannot be read or decoded or has
    /// zero width.
    pub fn load<P: AsRef<Path>>(path: P, trim: Option<&TrimOptions>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Error::invalid_image(path, e.to_string()))?;

        let mut resource = Self::from_bytes(data, trim).map_err(|e| match e {
            Error::InvalidImage { reason, .. } => Error::invalid_image(path, reason),
            other => other,
        })?;
        resource.filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(resource)
    }

    /// Prepare an image from encoded PNG or JPEG bytes.
    pub fn from_bytes(data: Vec<u8>, trim: Option<&TrimOptions>) -> Result<Self> {
        let format = detect_format_from_bytes(&data)
            .ok_or_else(|| Error::invalid_image("", "unrecognized image data"))?;

        if format == ImageFormat::Jpeg && trim.is_none() {
            if let Some(resource) = Self::jpeg_passthrough(&data)? {
                return Ok(resource.with_jpeg_data(data));
            }
            log::debug!("JPEG cannot be embedded directly, re-encoding samples");
        }

        let decode_format = match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        };
        let mut img = image::load_from_memory_with_format(&data, decode_format)
            .map_err(|e| Error::invalid_image("", format!("failed to decode image: {}", e)))?;

        if let Some(options) = trim {
            img = trim_whitespace(&img, options);
        }

        let mut resource = Self::from_image(&img)?;
        resource.format = format;
        Ok(resource)
    }

    /// Prepare an already decoded image.
    pub fn from_image(img: &DynamicImage) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        check_dimensions(width, height)?;

        let color = img.color();
        let pixels = match (color.has_color(), color.has_alpha()) {
            (false, false) => PixelData::Raw {
                channels: ColorChannels::Gray,
                samples: img.to_luma8().into_raw(),
                alpha: None,
            },
            (false, true) => {
                let (samples, alpha) = split_alpha(img.to_luma_alpha8().into_raw(), 1);
                PixelData::Raw {
                    channels: ColorChannels::Gray,
                    samples,
                    alpha: Some(alpha),
                }
            }
            (true, false) => PixelData::Raw {
                channels: ColorChannels::Rgb,
                samples: img.to_rgb8().into_raw(),
                alpha: None,
            },
            (true, true) => {
                let (samples, alpha) = split_alpha(img.to_rgba8().into_raw(), 3);
                PixelData::Raw {
                    channels: ColorChannels::Rgb,
                    samples,
                    alpha: Some(alpha),
                }
            }
        };

        Ok(Self {
            pixels,
            format: ImageFormat::Png,
            filename: None,
            width,
            height,
        })
    }

    /// Read the JPEG header; `None` if the stream must be re-encoded.
    fn jpeg_passthrough(data: &[u8]) -> Result<Option<Self>> {
        use jpeg_decoder::{CodingProcess, PixelFormat};

        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        decoder
            .read_info()
            .map_err(|e| Error::invalid_image("", format!("failed to read JPEG header: {}", e)))?;
        let info = decoder
            .info()
            .ok_or_else(|| Error::invalid_image("", "missing JPEG frame header"))?;

        let (width, height) = (u32::from(info.width), u32::from(info.height));
        check_dimensions(width, height)?;

        if info.coding_process == CodingProcess::Lossless {
            return Ok(None);
        }
        let color = match info.pixel_format {
            PixelFormat::L8 => JpegColor::Gray,
            PixelFormat::RGB24 => JpegColor::Rgb,
            // CMYK and 16-bit streams go through the decoder.
            _ => return Ok(None),
        };

        Ok(Some(Self {
            pixels: PixelData::Jpeg {
                data: Vec::new(),
                color,
            },
            format: ImageFormat::Jpeg,
            filename: None,
            width,
            height,
        }))
    }

    fn with_jpeg_data(mut self, bytes: Vec<u8>) -> Self {
        if let PixelData::Jpeg { ref mut data, .. } = self.pixels {
            *data = bytes;
        }
        self
    }

    /// Check if the image carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self.pixels, PixelData::Raw { alpha: Some(_), .. })
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 {
        return Err(Error::invalid_image("", "image has zero width"));
    }
    if height == 0 {
        return Err(Error::invalid_image("", "image has zero height"));
    }
    Ok(())
}

/// Split interleaved samples with a trailing alpha channel.
fn split_alpha(interleaved: Vec<u8>, color_samples: usize) -> (Vec<u8>, Vec<u8>) {
    let stride = color_samples + 1;
    let pixels = interleaved.len() / stride;
    let mut color = Vec::with_capacity(pixels * color_samples);
    let mut alpha = Vec::with_capacity(pixels);
    for chunk in interleaved.chunks_exact(stride) {
        color.extend_from_slice(&chunk[..color_samples]);
        alpha.push(chunk[color_samples]);
    }
    (color, alpha)
}
