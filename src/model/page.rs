//! Page-level types.

use super::{Color, TextStyle};
use serde::{Deserialize, Serialize};

/// A single worksheet page.
///
/// Coordinates are in millimeters with the origin at the top-left corner
/// and y growing downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in millimeters
    pub width: f64,

    /// Page height in millimeters
    pub height: f64,

    /// Title shown on the page
    pub title: String,

    /// Draw instructions in paint order
    pub elements: Vec<DrawOp>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            title: String::new(),
            elements: Vec::new(),
        }
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 210.0, 297.0)
    }

    /// Append a draw instruction.
    pub fn push(&mut self, op: DrawOp) {
        self.elements.push(op);
    }

    /// Check if the page has no draw instructions.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Resource IDs of the images drawn on this page.
    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|op| match op {
            DrawOp::Image { resource_id, .. } => Some(resource_id.as_str()),
            _ => None,
        })
    }

    /// Number of line instructions on the page.
    pub fn line_count(&self) -> usize {
        self.elements.iter().filter(|op| op.is_line()).count()
    }

    /// Text of every text instruction, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// One paint operation on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawOp {
    /// A single line of text; `y` is the baseline.
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },

    /// An embedded image; `x`/`y` is the top-left corner.
    Image {
        /// Resource ID of the image in the document
        resource_id: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// A straight stroked line.
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        /// Stroke width in millimeters
        width: f64,
    },
}

impl DrawOp {
    /// Check if this instruction draws text.
    pub fn is_text(&self) -> bool {
        matches!(self, DrawOp::Text { .. })
    }

    /// Check if this instruction draws an image.
    pub fn is_image(&self) -> bool {
        matches!(self, DrawOp::Image { .. })
    }

    /// Check if this instruction draws a line.
    pub fn is_line(&self) -> bool {
        matches!(self, DrawOp::Line { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::a4(1);
        assert_eq!(page.number, 1);
        assert_eq!(page.width, 210.0);
        assert_eq!(page.height, 297.0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_page_queries() {
        let mut page = Page::a4(2);
        page.push(DrawOp::Text {
            text: "Problem 2".to_string(),
            x: 11.0,
            y: 31.5,
            style: TextStyle::bold(14.0, Color::indigo()),
        });
        page.push(DrawOp::Image {
            resource_id: "I2".to_string(),
            x: 15.0,
            y: 40.0,
            width: 180.0,
            height: 90.0,
        });
        page.push(DrawOp::Line {
            x1: 15.0,
            y1: 200.0,
            x2: 195.0,
            y2: 200.0,
            color: Color::light_gray(),
            width: 0.2,
        });

        assert_eq!(page.image_ids().collect::<Vec<_>>(), ["I2"]);
        assert_eq!(page.texts().collect::<Vec<_>>(), ["Problem 2"]);
        assert_eq!(page.line_count(), 1);
        assert!(page.elements[0].is_text());
        assert!(page.elements[1].is_image());
    }

    #[test]
    fn test_draw_op_json_tag() {
        let op = DrawOp::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 0.0,
            color: Color::black(),
            width: 0.2,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("\"type\":\"line\""));
    }
}
