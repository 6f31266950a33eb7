//! Compile options and configuration.

use crate::layout::LayoutConfig;
use crate::preprocess::TrimOptions;

/// Options for compiling a directory into a worksheet.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Page layout constants
    pub layout: LayoutConfig,

    /// Whitespace trimming applied to each image (off when `None`)
    pub trim: Option<TrimOptions>,

    /// Author recorded in the PDF information dictionary
    pub author: Option<String>,
}

impl CompileOptions {
    /// Create new compile options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout constants.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Trim whitespace from images with the given options.
    pub fn with_trim(mut self, trim: TrimOptions) -> Self {
        self.trim = Some(trim);
        self
    }

    /// Trim whitespace from images with default options.
    pub fn trimmed(self) -> Self {
        self.with_trim(TrimOptions::default())
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_trim() {
        let options = CompileOptions::default();
        assert!(options.trim.is_none());
        assert!(options.author.is_none());
        assert_eq!(options.layout, LayoutConfig::default());
    }

    #[test]
    fn test_builder() {
        let options = CompileOptions::new()
            .with_layout(LayoutConfig::new().with_header_text("Quiz"))
            .trimmed()
            .with_author("Ms. Rivera");
        assert_eq!(options.layout.header_text, "Quiz");
        assert!(options.trim.is_some());
        assert_eq!(options.author.as_deref(), Some("Ms. Rivera"));
    }
}
