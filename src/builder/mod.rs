//! Document assembly.
//!
//! [`DocumentBuilder`] turns images into worksheet pages one at a time:
//! load the image, lay out the page, register the image as a resource.
//! The first failure aborts the build.

mod options;

pub use options::CompileOptions;

use crate::error::{Error, Result};
use crate::layout::{layout_page, LayoutConfig};
use crate::model::{Document, Page, Resource};
use crate::preprocess::TrimOptions;
use crate::source::{scan_dir, ImageEntry};
use std::path::Path;

/// Incrementally builds a worksheet document.
///
/// # Example
///
/// ```no_run
/// use worksheet::builder::DocumentBuilder;
/// use worksheet::layout::LayoutConfig;
///
/// let mut builder = DocumentBuilder::new(LayoutConfig::default());
/// builder.add_image("Problem 1", "problems/problem_1.png")?;
/// let doc = builder.finish();
/// assert_eq!(doc.page_count(), 1);
/// # Ok::<(), worksheet::Error>(())
/// ```
#[derive(Debug)]
pub struct DocumentBuilder {
    config: LayoutConfig,
    trim: Option<TrimOptions>,
    document: Document,
}

impl DocumentBuilder {
    /// Create a builder with the given layout constants.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            trim: None,
            document: Document::new(),
        }
    }

    /// Create a builder from compile options.
    pub fn from_options(options: &CompileOptions) -> Self {
        let mut builder = Self::new(options.layout.clone()).with_trim(options.trim.clone());
        builder.document.metadata.author = options.author.clone();
        builder
    }

    /// Set whitespace trimming for subsequently added images.
    pub fn with_trim(mut self, trim: Option<TrimOptions>) -> Self {
        self.trim = trim;
        self
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> u32 {
        self.document.page_count()
    }

    /// Add a page for a scanned directory entry.
    pub fn add_entry(&mut self, entry: &ImageEntry) -> Result<&Page> {
        self.add_image(&entry.title, &entry.path)
    }

    /// Add a page showing the image at `path` under `title`.
    ///
    /// The image file is read and closed before this returns.
    ///
    /// # Errors
    ///
    /// `Error::InvalidImage` if the image cannot be read, decoded or laid
    /// out; the builder is left unchanged.
    pub fn add_image<P: AsRef<Path>>(&mut self, title: &str, path: P) -> Result<&Page> {
        let path = path.as_ref();
        log::info!("Adding {}...", title);

        let resource = Resource::load(path, self.trim.as_ref())?;
        let layout =
            layout_page(title, resource.width, resource.height, &self.config).map_err(|e| {
                match e {
                    Error::InvalidImage { reason, .. } => Error::invalid_image(path, reason),
                    other => other,
                }
            })?;

        let number = self.document.page_count() + 1;
        let resource_id = format!("I{}", number);
        log::debug!(
            "Page {}: {} ({}x{} px) as {}",
            number,
            path.display(),
            resource.width,
            resource.height,
            resource_id
        );

        let page = layout.into_page(number, &resource_id);
        self.document.add_resource(resource_id, resource);
        self.document.add_page(page);
        self.document
            .get_page(number)
            .ok_or_else(|| Error::Render(format!("page {} missing after insert", number)))
    }

    /// Add a page for each entry in order, calling `on_entry` before each.
    ///
    /// `on_entry` receives the zero-based position, the total number of
    /// entries and the entry itself. The first failing image stops the run;
    /// pages added before it are kept.
    pub fn add_entries<F>(&mut self, entries: &[ImageEntry], mut on_entry: F) -> Result<()>
    where
        F: FnMut(usize, usize, &ImageEntry),
    {
        for (index, entry) in entries.iter().enumerate() {
            on_entry(index, entries.len(), entry);
            self.add_entry(entry)?;
        }
        Ok(())
    }

    /// Finish building and return the document.
    pub fn finish(self) -> Document {
        self.document
    }
}

/// Build a worksheet from every supported image in `dir`.
///
/// Pages follow the sorted file-name order of the directory.
///
/// # Errors
///
/// * `Error::InvalidDirectory` / `Error::EmptyInput` from scanning
/// * `Error::InvalidImage` for the first image that fails
/// * `Error::InvalidConfig` if the layout constants are unusable
pub fn compile_dir<P: AsRef<Path>>(dir: P, options: &CompileOptions) -> Result<Document> {
    compile_dir_with(dir, options, |_, _, _| {})
}

/// Like [`compile_dir`], reporting each image before it is added.
///
/// `on_entry` gets the same arguments as in
/// [`DocumentBuilder::add_entries`].
///
/// # Example
///
/// ```no_run
/// use worksheet::builder::compile_dir_with;
/// use worksheet::CompileOptions;
///
/// let doc = compile_dir_with("./problems", &CompileOptions::default(), |i, total, entry| {
///     println!("[{}/{}] {}", i + 1, total, entry.title);
/// })?;
/// # Ok::<(), worksheet::Error>(())
/// ```
pub fn compile_dir_with<P, F>(dir: P, options: &CompileOptions, on_entry: F) -> Result<Document>
where
    P: AsRef<Path>,
    F: FnMut(usize, usize, &ImageEntry),
{
    options.layout.validate()?;
    let entries = scan_dir(dir)?;

    let mut builder = DocumentBuilder::from_options(options);
    builder.add_entries(&entries, on_entry)?;
    Ok(builder.finish())
}
