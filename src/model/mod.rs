//! Document model types for worksheet content.
//!
//! This module defines the intermediate representation that bridges page
//! layout and PDF encoding. Pages hold plain draw instructions in
//! millimeters with a top-left origin; nothing here depends on the
//! output format.

mod document;
mod page;
mod resource;
mod style;

pub use document::{Document, Metadata};
pub use page::{DrawOp, Page};
pub use resource::{ColorChannels, JpegColor, PixelData, Resource};
pub use style::{Color, FontFace, TextStyle};
