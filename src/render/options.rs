//! Rendering options and configuration.

/// Options for encoding a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Flate-compress content streams and raw image samples
    pub compress: bool,

    /// Write the document information dictionary
    pub include_metadata: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Enable or disable the information dictionary.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            compress: true,
            include_metadata: true,
        }
    }
}
