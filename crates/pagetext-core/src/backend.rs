use std::path::Path;

use thiserror::Error;

use crate::model::PageContent;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF parsing backends.
///
/// Implementors own the file format; word grouping and text reconstruction
/// live in [`crate::extract::TextExtractor`].
pub trait PdfBackend: Send + Sync {
    /// Open a PDF file. The returned document holds the file until dropped.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// An open PDF document.
pub trait PdfDocument {
    fn page_count(&self) -> Result<usize, BackendError>;

    /// Load the positioned glyphs of the page at `index` (0-based).
    fn load_page(&self, index: usize) -> Result<PageContent, BackendError>;
}
