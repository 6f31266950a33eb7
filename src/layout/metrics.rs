//! Advance widths for the base-14 Helvetica-Bold face.
//!
//! Widths are in 1/1000 em from the Adobe AFM files and cover ASCII
//! 0x20..=0x7E. Index = (char as usize) - 32. Characters outside the
//! table use the width of `n`, which is close enough for centering.

use crate::model::FontFace;

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Advance width of `c` in 1/1000 em.
pub fn char_width(font: FontFace, c: char) -> u16 {
    let table = match font {
        FontFace::HelveticaBold => &HELVETICA_BOLD,
    };
    let code = c as usize;
    if (32..=126).contains(&code) {
        table[code - 32]
    } else {
        table['n' as usize - 32]
    }
}

/// Width of `text` set in `font` at `size` points, in points.
pub fn text_width_pt(font: FontFace, size: f64, text: &str) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(font, c))).sum();
    units as f64 * size / 1000.0
}
