//! Page layout: geometry of every element on one worksheet page.
//!
//! The engine is a pure function of the title, the image's pixel size and
//! a [`LayoutConfig`]. Elements are stacked top to bottom with a running
//! cursor that starts fresh on every page:
//!
//! ```text
//!   +------------------------------------+
//!   |         Homework Worksheet         |  header band (centered)
//!   | Problem 1                          |  title
//!   |  +------------------------------+  |
//!   |  |            image             |  |  fit to width or height
//!   |  +------------------------------+  |
//!   | NOTES / SOLUTION AREA              |  caption
//!   |  ______________________________    |
//!   |  ______________________________    |  ruled lines down to the
//!   |  ______________________________    |  bottom margin
//!   +------------------------------------+
//! ```

use super::config::{LayoutConfig, MM_PER_PT};
use super::metrics::text_width_pt;
use crate::error::{Error, Result};
use crate::model::{Color, DrawOp, Page, TextStyle};
use serde::{Deserialize, Serialize};

/// Which constraint bounded the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Image spans the usable width
    Width,
    /// Image is capped at the maximum height
    Height,
}

/// Scale an image of `width_px` x `height_px` into the available box.
///
/// Fits to `usable_width` first and falls back to `max_height` only when
/// the fitted height is strictly greater than the cap, so an exact tie
/// keeps the full width. Returns `(draw_width, draw_height, mode)`.
///
/// # Errors
///
/// `Error::InvalidImage` if `width_px` is zero.
pub fn fit_image(
    usable_width: f64,
    max_height: f64,
    width_px: u32,
    height_px: u32,
) -> Result<(f64, f64, FitMode)> {
    if width_px == 0 {
        return Err(Error::invalid_image("", "image has zero width"));
    }

    let aspect = height_px as f64 / width_px as f64;
    let draw_height = usable_width * aspect;
    if draw_height > max_height {
        Ok((max_height / aspect, max_height, FitMode::Height))
    } else {
        Ok((usable_width, draw_height, FitMode::Width))
    }
}

/// A single line of text placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub x: f64,
    /// Baseline position
    pub baseline: f64,
    pub style: TextStyle,
}

impl TextBlock {
    /// Left-aligned text in a cell of height `cell_height` whose top is `y`.
    fn left(text: &str, style: TextStyle, x: f64, y: f64, cell_height: f64) -> Self {
        Self {
            text: text.to_string(),
            x,
            baseline: baseline(y, cell_height, style.size),
            style,
        }
    }

    /// Text centered between `left` and `right`.
    fn centered(
        text: &str,
        style: TextStyle,
        left: f64,
        right: f64,
        y: f64,
        cell_height: f64,
    ) -> Self {
        let width = text_width_pt(style.font, style.size, text) * MM_PER_PT;
        Self {
            text: text.to_string(),
            x: left + (right - left - width) / 2.0,
            baseline: baseline(y, cell_height, style.size),
            style,
        }
    }

    fn to_op(&self) -> DrawOp {
        DrawOp::Text {
            text: self.text.clone(),
            x: self.x,
            y: self.baseline,
            style: self.style,
        }
    }
}

/// Vertically centered baseline inside a cell.
fn baseline(cell_top: f64, cell_height: f64, size_pt: f64) -> f64 {
    cell_top + cell_height / 2.0 + 0.3 * size_pt * MM_PER_PT
}

/// The scaled image and its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub source_width: u32,
    pub source_height: u32,
    /// Top-left corner
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fit: FitMode,
}

impl ImageBlock {
    /// Scale an image to the config's box and place it at `(x, y)`.
    pub fn fit(width_px: u32, height_px: u32, x: f64, y: f64, config: &LayoutConfig) -> Result<Self> {
        let (width, height, fit) = fit_image(
            config.usable_width(),
            config.max_image_height(),
            width_px,
            height_px,
        )?;
        Ok(Self {
            source_width: width_px,
            source_height: height_px,
            x,
            y,
            width,
            height,
            fit,
        })
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Ruled lines for handwritten notes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotesArea {
    /// Y of the first line
    pub start_y: f64,
    pub spacing: f64,
    /// Lines stop before this y
    pub stop_y: f64,
    pub left: f64,
    pub right: f64,
    pub color: Color,
    pub stroke_width: f64,
}

impl NotesArea {
    /// Number of whole line intervals that fit between start and stop.
    ///
    /// Zero when the start is within one spacing of the stop or past it.
    pub fn line_count(&self) -> usize {
        notes_line_count(self.start_y, self.stop_y, self.spacing)
    }

    /// Y coordinate of every line, top to bottom.
    pub fn line_positions(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.line_count()).map(move |k| self.start_y + k as f64 * self.spacing)
    }
}

/// `floor((stop - start) / spacing)`, clamped at zero.
pub fn notes_line_count(start_y: f64, stop_y: f64, spacing: f64) -> usize {
    if spacing <= 0.0 || start_y >= stop_y {
        return 0;
    }
    ((stop_y - start_y) / spacing).floor() as usize
}

/// Full geometry of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub header: TextBlock,
    pub title: TextBlock,
    pub image: ImageBlock,
    pub notes_label: TextBlock,
    pub notes: NotesArea,
}

impl PageLayout {
    /// Draw instructions in paint order.
    ///
    /// `resource_id` names the document resource holding the image.
    pub fn instructions(&self, resource_id: &str) -> Vec<DrawOp> {
        let mut ops = Vec::with_capacity(4 + self.notes.line_count());
        ops.push(self.header.to_op());
        ops.push(self.title.to_op());
        ops.push(DrawOp::Image {
            resource_id: resource_id.to_string(),
            x: self.image.x,
            y: self.image.y,
            width: self.image.width,
            height: self.image.height,
        });
        ops.push(self.notes_label.to_op());
        ops.extend(self.notes.line_positions().map(|y| DrawOp::Line {
            x1: self.notes.left,
            y1: y,
            x2: self.notes.right,
            y2: y,
            color: self.notes.color,
            width: self.notes.stroke_width,
        }));
        ops
    }

    /// Materialize the layout as a document page.
    pub fn into_page(self, number: u32, resource_id: &str) -> Page {
        let mut page = Page::new(number, self.width, self.height);
        page.elements = self.instructions(resource_id);
        page.title = self.title.text;
        page
    }
}

/// Lay out one worksheet page.
///
/// # Arguments
///
/// * `title` - Page title, drawn left-aligned below the header
/// * `image_width_px` / `image_height_px` - Source image size in pixels
/// * `config` - Layout constants
///
/// # Errors
///
/// * `Error::InvalidImage` if the image width is zero
/// * `Error::InvalidConfig` if `config` fails validation
///
/// # Example
///
/// ```
/// use worksheet::layout::{layout_page, FitMode, LayoutConfig};
///
/// let layout = layout_page("Problem 1", 600, 800, &LayoutConfig::default())?;
/// assert_eq!(layout.image.fit, FitMode::Height);
/// assert_eq!(layout.image.y, 40.0);
/// # Ok::<(), worksheet::Error>(())
/// ```
pub fn layout_page(
    title: &str,
    image_width_px: u32,
    image_height_px: u32,
    config: &LayoutConfig,
) -> Result<PageLayout> {
    config.validate()?;
    let g = &config.geometry;
    let inset = config.text_inset;

    let header = TextBlock::centered(
        &config.header_text,
        config.header_style,
        inset,
        g.width - inset,
        inset,
        config.header_height,
    );
    let mut cursor = inset + config.header_height + config.header_gap;

    let title = TextBlock::left(
        title,
        config.title_style,
        inset + config.cell_padding,
        cursor,
        config.title_height,
    );
    cursor += config.title_height + config.title_gap;

    let image = ImageBlock::fit(image_width_px, image_height_px, g.margin, cursor, config)?;
    cursor = image.bottom() + config.image_gap;

    let notes_label = TextBlock::left(
        &config.notes_label,
        config.notes_style,
        inset + config.cell_padding,
        cursor,
        config.notes_label_height,
    );
    cursor += config.notes_label_height;

    let notes = NotesArea {
        start_y: cursor,
        spacing: config.rule_spacing,
        stop_y: g.bottom_limit(),
        left: g.margin,
        right: g.width - g.margin,
        color: config.rule_color,
        stroke_width: config.rule_width,
    };

    log::debug!(
        "Layout '{}': {}x{} px -> {:.2}x{:.2} mm ({:?} fit), {} rules from y={:.2}",
        title.text,
        image_width_px,
        image_height_px,
        image.width,
        image.height,
        image.fit,
        notes.line_count(),
        notes.start_y
    );

    Ok(PageLayout {
        width: g.width,
        height: g.height,
        header,
        title,
        image,
        notes_label,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_fit_landscape_uses_width() {
        let (w, h, mode) = fit_image(180.0, 133.65, 1000, 600).unwrap();
        assert_eq!(mode, FitMode::Width);
        assert_eq!(w, 180.0);
        assert!((h - 108.0).abs() < EPS);
    }

    #[test]
    fn test_fit_portrait_uses_height() {
        let (w, h, mode) = fit_image(180.0, 133.65, 600, 800).unwrap();
        assert_eq!(mode, FitMode::Height);
        assert_eq!(h, 133.65);
        assert!((w - 133.65 * 0.75).abs() < EPS);
    }

    #[test]
    fn test_fit_square_uses_height() {
        let (w, h, mode) = fit_image(180.0, 133.65, 500, 500).unwrap();
        assert_eq!(mode, FitMode::Height);
        assert!((w - h).abs() < EPS);
    }

    #[test]
    fn test_fit_tie_keeps_width() {
        // 180 * 0.5 == 90 exactly
        let (w, h, mode) = fit_image(180.0, 90.0, 400, 200).unwrap();
        assert_eq!(mode, FitMode::Width);
        assert_eq!((w, h), (180.0, 90.0));
    }

    #[test]
    fn test_fit_tie_at_default_cap() {
        // 180 * (2970 / 4000) and 297 * 0.45 round to the same f64.
        let config = LayoutConfig::default();
        let max_height = config.max_image_height();
        let (w, h, mode) = fit_image(config.usable_width(), max_height, 4000, 2970).unwrap();
        assert_eq!(mode, FitMode::Width);
        assert_eq!(w, 180.0);
        assert_eq!(h, max_height);

        let layout = layout_page("Tie", 4000, 2970, &config).unwrap();
        assert_eq!(layout.image.fit, FitMode::Width);
    }

    #[test]
    fn test_fit_near_zero_height() {
        let (w, h, mode) = fit_image(180.0, 133.65, 10_000, 1).unwrap();
        assert_eq!(mode, FitMode::Width);
        assert_eq!(w, 180.0);
        assert!(h > 0.0 && h < 0.02);

        let (_, h, mode) = fit_image(180.0, 133.65, 10, 0).unwrap();
        assert_eq!(mode, FitMode::Width);
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_fit_zero_width_is_invalid() {
        let result = fit_image(180.0, 133.65, 0, 100);
        assert!(matches!(result, Err(Error::InvalidImage { .. })));
    }

    #[test]
    fn test_layout_cursor_positions() {
        let config = LayoutConfig::default();
        let layout = layout_page("Problem 2", 1000, 600, &config).unwrap();

        assert_eq!(layout.image.x, 15.0);
        assert_eq!(layout.image.y, 40.0);
        assert_eq!(layout.image.fit, FitMode::Width);
        // 40 + 108 + 15 = 163, caption cell 10 high
        assert!((layout.notes.start_y - 173.0).abs() < EPS);
        assert_eq!(layout.notes.line_count(), 13);
        assert_eq!(layout.notes.left, 15.0);
        assert_eq!(layout.notes.right, 195.0);
    }

    #[test]
    fn test_layout_text_placement() {
        let config = LayoutConfig::default();
        let layout = layout_page("Problem 1", 600, 800, &config).unwrap();

        assert_eq!(layout.title.text, "Problem 1");
        assert_eq!(layout.title.x, 11.0);
        // cell top 25, half height 5, 0.3 * 14pt in mm
        let expected = 25.0 + 5.0 + 0.3 * 14.0 * MM_PER_PT;
        assert!((layout.title.baseline - expected).abs() < EPS);

        // Header is centered across the 190 mm text band.
        let header_w = text_width_pt(
            config.header_style.font,
            config.header_style.size,
            &config.header_text,
        ) * MM_PER_PT;
        let left_gap = layout.header.x - 10.0;
        let right_gap = 200.0 - (layout.header.x + header_w);
        assert!((left_gap - right_gap).abs() < EPS);

        let caption_top = layout.image.bottom() + 15.0;
        assert!(layout.notes_label.baseline > caption_top);
        assert!(layout.notes_label.baseline < caption_top + 10.0);
    }

    #[test]
    fn test_header_is_page_independent() {
        let config = LayoutConfig::default();
        let a = layout_page("A", 100, 100, &config).unwrap();
        let b = layout_page("Something longer", 3000, 20, &config).unwrap();
        assert_eq!(a.header, b.header);
    }

    #[test]
    fn test_notes_line_count_formula() {
        assert_eq!(notes_line_count(198.65, 282.0, 8.0), 10);
        assert_eq!(notes_line_count(266.0, 282.0, 8.0), 2);
        assert_eq!(notes_line_count(275.0, 282.0, 8.0), 0);
        assert_eq!(notes_line_count(282.0, 282.0, 8.0), 0);
        assert_eq!(notes_line_count(290.0, 282.0, 8.0), 0);
    }

    #[test]
    fn test_notes_area_can_be_empty() {
        // A page just tall enough for the fixed elements leaves no room.
        let config = LayoutConfig::default().with_geometry(super::super::PageGeometry {
            width: 210.0,
            height: 120.0,
            margin: 15.0,
        });
        let layout = layout_page("Tall", 100, 1000, &config).unwrap();
        assert_eq!(layout.notes.line_count(), 0);
        assert_eq!(layout.notes.line_positions().count(), 0);
        assert!(layout.instructions("I1").iter().all(|op| !op.is_line()));
    }

    #[test]
    fn test_instructions_order() {
        let layout = layout_page("Problem 3", 800, 400, &LayoutConfig::default()).unwrap();
        let lines = layout.notes.line_count();
        let ops = layout.instructions("I3");

        assert_eq!(ops.len(), 4 + lines);
        assert!(ops[0].is_text());
        assert!(ops[1].is_text());
        assert!(matches!(&ops[2], DrawOp::Image { resource_id, .. } if resource_id == "I3"));
        assert!(ops[3].is_text());
        assert!(ops[4..].iter().all(DrawOp::is_line));

        let ys: Vec<f64> = layout.notes.line_positions().collect();
        for pair in ys.windows(2) {
            assert!((pair[1] - pair[0] - 8.0).abs() < EPS);
        }
        assert!(ys.last().unwrap() + 8.0 <= 282.0 + EPS);
    }

    #[test]
    fn test_into_page() {
        let page = layout_page("Problem 4", 640, 480, &LayoutConfig::default())
            .unwrap()
            .into_page(4, "I4");
        assert_eq!(page.number, 4);
        assert_eq!(page.title, "Problem 4");
        assert_eq!((page.width, page.height), (210.0, 297.0));
        assert_eq!(page.image_ids().collect::<Vec<_>>(), ["I4"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LayoutConfig::default().with_rule_spacing(-1.0);
        assert!(matches!(
            layout_page("X", 10, 10, &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
