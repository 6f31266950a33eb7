//! Colors, fonts and text styles.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Indigo accent used for the header and page titles.
    pub const fn indigo() -> Self {
        Self::rgb(67, 79, 241)
    }

    /// Green accent used for the notes caption.
    pub const fn green() -> Self {
        Self::rgb(74, 222, 128)
    }

    /// Light gray used for the ruled lines.
    pub const fn light_gray() -> Self {
        Self::rgb(220, 220, 220)
    }

    /// Components scaled to the 0.0-1.0 range used by PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// The standard PDF fonts used on a page.
///
/// Every line of page text is set in bold Helvetica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    HelveticaBold,
}

impl FontFace {
    /// PostScript name of the base-14 font.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::HelveticaBold => "F1",
        }
    }
}

/// Font, size and color of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontFace,

    /// Font size in points
    pub size: f64,

    pub color: Color,
}

impl TextStyle {
    pub fn new(font: FontFace, size: f64, color: Color) -> Self {
        Self { font, size, color }
    }

    /// Bold Helvetica at the given size and color.
    pub fn bold(size: f64, color: Color) -> Self {
        Self::new(FontFace::HelveticaBold, size, color)
    }
}
