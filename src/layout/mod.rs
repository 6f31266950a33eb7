//! Page layout engine.
//!
//! Computes where every element of a worksheet page goes. All math is in
//! millimeters and independent of the output format, so geometry can be
//! checked without producing a PDF.

mod config;
mod engine;
pub mod metrics;

pub use config::{LayoutConfig, PageGeometry, MM_PER_PT};
pub use engine::{
    fit_image, layout_page, notes_line_count, FitMode, ImageBlock, NotesArea, PageLayout,
    TextBlock,
};
