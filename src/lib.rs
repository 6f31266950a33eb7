//! # worksheet
//!
//! Compile a folder of problem images into a printable homework worksheet.
//!
//! Every PNG or JPEG in a directory becomes one A4 page: a header band, a
//! title derived from the file name, the image scaled to fit, and a ruled
//! notes area filling the rest of the page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use worksheet::{compile_dir, render, CompileOptions};
//!
//! fn main() -> worksheet::Result<()> {
//!     // Lay out one page per image
//!     let doc = compile_dir("./problems", &CompileOptions::default())?;
//!
//!     // Encode and save
//!     let options = render::RenderOptions::default();
//!     render::write_pdf(&doc, "homework_worksheet.pdf", &options)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Deterministic ordering**: pages follow sorted file names
//! - **Aspect-preserving fit**: images span the page width unless that
//!   would make them taller than 45% of the page
//! - **Format-independent layout**: geometry is computed in millimeters
//!   and can be inspected as JSON before encoding
//! - **Whitespace trim**: optional cropping of blank borders and gaps

pub mod builder;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod preprocess;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use builder::{CompileOptions, DocumentBuilder};
pub use detect::{detect_format_from_bytes, ImageFormat};
pub use error::{Error, Result};
pub use layout::{layout_page, FitMode, LayoutConfig, PageGeometry, PageLayout};
pub use model::{Color, Document, DrawOp, FontFace, Metadata, Page, Resource, TextStyle};
pub use preprocess::TrimOptions;
pub use render::{JsonFormat, RenderOptions};
pub use source::{derive_title, scan_dir, ImageEntry};

use std::path::Path;

/// Lay out a worksheet from every supported image in a directory.
///
/// # Arguments
///
/// * `dir` - Directory holding the problem images
/// * `options` - Layout and trim options
///
/// # Example
///
/// ```no_run
/// use worksheet::{compile_dir, CompileOptions};
///
/// let doc = compile_dir("./problems", &CompileOptions::default()).unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn compile_dir<P: AsRef<Path>>(dir: P, options: &CompileOptions) -> Result<Document> {
    builder::compile_dir(dir, options)
}

/// Compile a directory straight to a PDF file with default options.
///
/// Nothing is written unless every image loads.
///
/// # Example
///
/// ```no_run
/// use worksheet::compile_to_pdf;
///
/// let pages = compile_to_pdf("./problems", "homework_worksheet.pdf").unwrap();
/// println!("Wrote {} pages", pages);
/// ```
pub fn compile_to_pdf<P: AsRef<Path>, Q: AsRef<Path>>(dir: P, out: Q) -> Result<u32> {
    let doc = compile_dir(dir, &CompileOptions::default())?;
    render::write_pdf(&doc, out, &RenderOptions::default())?;
    Ok(doc.page_count())
}

/// Lay out a directory and return the layout as JSON.
///
/// # Example
///
/// ```no_run
/// use worksheet::{to_json, JsonFormat};
///
/// let json = to_json("./problems", JsonFormat::Pretty).unwrap();
/// std::fs::write("layout.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(dir: P, format: JsonFormat) -> Result<String> {
    let doc = compile_dir(dir, &CompileOptions::default())?;
    render::to_json(&doc, format)
}

/// Builder for compiling and encoding worksheets.
///
/// # Example
///
/// ```no_run
/// use worksheet::Worksheet;
///
/// Worksheet::new()
///     .with_trim()
///     .with_header("Week 3 Homework")
///     .compile("./problems")?
///     .write_to("week3.pdf")?;
/// # Ok::<(), worksheet::Error>(())
/// ```
pub struct Worksheet {
    compile_options: CompileOptions,
    render_options: RenderOptions,
}

impl Worksheet {
    /// Create a new Worksheet builder.
    pub fn new() -> Self {
        Self {
            compile_options: CompileOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the layout constants.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.compile_options = self.compile_options.with_layout(layout);
        self
    }

    /// Set the header text shown on every page.
    pub fn with_header(mut self, text: impl Into<String>) -> Self {
        self.compile_options.layout = self.compile_options.layout.with_header_text(text);
        self
    }

    /// Trim whitespace from images with default options.
    pub fn with_trim(mut self) -> Self {
        self.compile_options = self.compile_options.trimmed();
        self
    }

    /// Trim whitespace from images with custom options.
    pub fn with_trim_options(mut self, trim: TrimOptions) -> Self {
        self.compile_options = self.compile_options.with_trim(trim);
        self
    }

    /// Set the author recorded in the PDF.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.compile_options = self.compile_options.with_author(author);
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.render_options = self.render_options.with_compression(compress);
        self
    }

    /// Compile a directory and return a result wrapper.
    pub fn compile<P: AsRef<Path>>(self, dir: P) -> Result<WorksheetResult> {
        let document = compile_dir(dir, &self.compile_options)?;
        Ok(WorksheetResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::new()
    }
}

/// Result wrapper for a compiled worksheet.
pub struct WorksheetResult {
    document: Document,
    render_options: RenderOptions,
}

impl WorksheetResult {
    /// Get the compiled document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take ownership of the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Encode to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.document, &self.render_options)
    }

    /// Encode and write to a file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::write_pdf(&self.document, path, &self.render_options)
    }

    /// Serialize the layout to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(120, 80, Rgb([30, 30, 30]))
            .save(dir.path().join("problem_1.png"))
            .unwrap();
        dir
    }

    #[test]
    fn test_worksheet_builder() {
        let dir = fixture();
        let result = Worksheet::new()
            .with_header("Quiz")
            .with_compression(false)
            .compile(dir.path())
            .unwrap();

        assert_eq!(result.document().page_count(), 1);
        let texts: Vec<&str> = result.document().pages[0].texts().collect();
        assert_eq!(texts[0], "Quiz");
        assert_eq!(texts[1], "Problem 1");

        let bytes = result.to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_author_in_pdf_info() {
        let dir = fixture();
        let result = Worksheet::new()
            .with_author("Ms. Rivera")
            .compile(dir.path())
            .unwrap();
        assert_eq!(
            result.document().metadata.author.as_deref(),
            Some("Ms. Rivera")
        );

        let bytes = result.to_pdf().unwrap();
        let needle = b"/Author (Ms. Rivera)";
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn test_compile_to_pdf() {
        let dir = fixture();
        let out = dir.path().join("out.pdf");
        assert_eq!(compile_to_pdf(dir.path(), &out).unwrap(), 1);
        assert!(out.exists());
    }

    #[test]
    fn test_to_json_convenience() {
        let dir = fixture();
        let json = to_json(dir.path(), JsonFormat::Compact).unwrap();
        assert!(json.contains("Problem 1"));
    }
}
