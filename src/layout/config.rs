//! Layout constants.

use crate::error::{Error, Result};
use crate::model::{Color, TextStyle};
use serde::{Deserialize, Serialize};

/// Millimeters per PDF point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Physical page size and image margin, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,

    /// Margin for the image and the ruled notes area
    pub margin: f64,
}

impl PageGeometry {
    /// A4 portrait with a 15 mm margin.
    pub const fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 15.0,
        }
    }

    /// Page width minus both horizontal margins.
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Y coordinate where the ruled notes area stops.
    pub fn bottom_limit(&self) -> f64 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Every constant used by the layout engine.
///
/// Text cells (header, title, notes caption) sit inside `text_inset`;
/// the image and the ruled lines use the geometry margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub geometry: PageGeometry,

    /// Left, top and right inset of text cells
    pub text_inset: f64,

    /// Horizontal padding before left-aligned text inside its cell
    pub cell_padding: f64,

    pub header_text: String,
    pub header_style: TextStyle,
    pub header_height: f64,
    /// Space between the header band and the title
    pub header_gap: f64,

    pub title_style: TextStyle,
    pub title_height: f64,
    /// Space between the title and the image
    pub title_gap: f64,

    /// Image height cap as a fraction of the full page height
    pub image_max_fraction: f64,
    /// Space between the image and the notes caption
    pub image_gap: f64,

    pub notes_label: String,
    pub notes_style: TextStyle,
    pub notes_label_height: f64,

    pub rule_spacing: f64,
    pub rule_color: Color,
    /// Rule stroke width in millimeters
    pub rule_width: f64,
}

impl LayoutConfig {
    /// Create a layout config with the built-in constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the header text.
    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = text.into();
        self
    }

    /// Set the notes caption.
    pub fn with_notes_label(mut self, label: impl Into<String>) -> Self {
        self.notes_label = label.into();
        self
    }

    /// Set the image height cap as a fraction of the page height.
    pub fn with_image_max_fraction(mut self, fraction: f64) -> Self {
        self.image_max_fraction = fraction;
        self
    }

    /// Set the distance between ruled lines.
    pub fn with_rule_spacing(mut self, spacing: f64) -> Self {
        self.rule_spacing = spacing;
        self
    }

    /// Width available to the image.
    pub fn usable_width(&self) -> f64 {
        self.geometry.usable_width()
    }

    /// Tallest allowed image.
    pub fn max_image_height(&self) -> f64 {
        self.geometry.height * self.image_max_fraction
    }

    /// Reject constants that make the layout undefined.
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        if !(g.width > 0.0 && g.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "page size must be positive, got {}x{}",
                g.width, g.height
            )));
        }
        if g.margin < 0.0 || g.usable_width() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "margin {} leaves no usable width on a {} wide page",
                g.margin, g.width
            )));
        }
        if !(self.image_max_fraction > 0.0 && self.image_max_fraction <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "image fraction must be in (0, 1], got {}",
                self.image_max_fraction
            )));
        }
        if !(self.rule_spacing > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "rule spacing must be positive, got {}",
                self.rule_spacing
            )));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            text_inset: 10.0,
            cell_padding: 1.0,
            header_text: "Homework Worksheet".to_string(),
            header_style: TextStyle::bold(15.0, Color::indigo()),
            header_height: 10.0,
            header_gap: 5.0,
            title_style: TextStyle::bold(14.0, Color::indigo()),
            title_height: 10.0,
            title_gap: 5.0,
            image_max_fraction: 0.45,
            image_gap: 15.0,
            notes_label: "NOTES / SOLUTION AREA".to_string(),
            notes_style: TextStyle::bold(10.0, Color::green()),
            notes_label_height: 10.0,
            rule_spacing: 8.0,
            rule_color: Color::light_gray(),
            rule_width: 0.2,
        }
    }
}
