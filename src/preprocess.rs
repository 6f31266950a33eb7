//! Whitespace trimming for scanned or screenshotted problems.
//!
//! Crops an image to its content box and collapses long vertical runs of
//! blank rows, then pads the result with a white border. Rows with only a
//! few dark pixels (stray page numbers, scanner noise) count as blank.

use image::{DynamicImage, Rgb, RgbImage};

/// Options controlling [`trim_whitespace`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOptions {
    /// A pixel is content if any channel is below this value
    pub white_threshold: u8,

    /// Minimum content pixels per row, as a fraction of the width
    pub min_row_fraction: f64,

    /// Lower bound for the per-row content pixel threshold
    pub min_row_pixels: usize,

    /// Longest run of blank rows kept inside the content box
    pub max_gap_rows: usize,

    /// White padding added on every side, in pixels
    pub padding: u32,
}

impl TrimOptions {
    /// Create trim options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the padding added around the content.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            white_threshold: 240,
            min_row_fraction: 0.015,
            min_row_pixels: 5,
            max_gap_rows: 60,
            padding: 24,
        }
    }
}

/// Trim white borders and collapse large blank gaps.
///
/// Transparent pixels are composited over white first. If the image has
/// no content box (blank, or content confined to one row or column) it
/// is returned unchanged.
pub fn trim_whitespace(img: &DynamicImage, options: &TrimOptions) -> DynamicImage {
    let flat = flatten_on_white(img);
    let (w, h) = flat.dimensions();
    let (w_us, h_us) = (w as usize, h as usize);

    let is_content = |x: u32, y: u32| {
        let Rgb(px) = *flat.get_pixel(x, y);
        px.iter().any(|&c| c < options.white_threshold)
    };

    let row_threshold = (options.min_row_pixels as f64).max(w as f64 * options.min_row_fraction);
    let rows: Vec<bool> = (0..h)
        .map(|y| (0..w).filter(|&x| is_content(x, y)).count() as f64 > row_threshold)
        .collect();

    let cols: Vec<bool> = (0..w)
        .map(|x| (0..h).any(|y| rows[y as usize] && is_content(x, y)))
        .collect();

    let (top, bottom) = match bounds(&rows) {
        Some(b) => b,
        None => return img.clone(),
    };
    let (left, right) = match bounds(&cols) {
        Some(b) => b,
        None => return img.clone(),
    };
    if top >= bottom || left >= right {
        return img.clone();
    }

    let mut kept_rows = Vec::with_capacity(bottom - top + 1);
    let mut gap = 0usize;
    for (y, &has_content) in rows.iter().enumerate().take(bottom + 1).skip(top) {
        gap = if has_content { 0 } else { gap + 1 };
        if gap <= options.max_gap_rows {
            kept_rows.push(y as u32);
        }
    }

    let content_w = (right - left + 1) as u32;
    let pad = options.padding;
    let mut out = RgbImage::from_pixel(
        content_w + pad * 2,
        kept_rows.len() as u32 + pad * 2,
        Rgb([255, 255, 255]),
    );
    for (new_y, &old_y) in kept_rows.iter().enumerate() {
        for dx in 0..content_w {
            let px = *flat.get_pixel(left as u32 + dx, old_y);
            out.put_pixel(pad + dx, pad + new_y as u32, px);
        }
    }

    log::debug!(
        "Trimmed {}x{} image to {}x{} ({} of {} rows kept)",
        w_us,
        h_us,
        out.width(),
        out.height(),
        kept_rows.len(),
        bottom - top + 1
    );

    DynamicImage::ImageRgb8(out)
}

/// First and last index of the `true` entries.
fn bounds(flags: &[bool]) -> Option<(usize, usize)> {
    let first = flags.iter().position(|&f| f)?;
    let last = flags.iter().rposition(|&f| f)?;
    Some((first, last))
}

fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let a = px[3] as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    out
}
