//! In-memory backend for testing.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PdfBackend, PdfDocument};
use crate::model::PageContent;

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Supports:
/// - Serving a fixed list of pages for any path.
/// - Failing on open, or on a given page index.
/// - Counting documents that are currently open via
///   [`open_documents()`](MockBackend::open_documents).
pub struct MockBackend {
    pages: Vec<PageContent>,
    fail_open: Option<String>,
    fail_page: Option<usize>,
    open_documents: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self {
            pages,
            fail_open: None,
            fail_page: None,
            open_documents: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail every `open` with this message.
    pub fn failing_open(message: impl Into<String>) -> Self {
        Self {
            fail_open: Some(message.into()),
            ..Self::new(Vec::new())
        }
    }

    /// Fail when the page at `index` (0-based) is loaded.
    pub fn with_failing_page(mut self, index: usize) -> Self {
        self.fail_page = Some(index);
        self
    }

    /// Documents opened through this backend and not yet dropped.
    pub fn open_documents(&self) -> usize {
        self.open_documents.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        if let Some(message) = &self.fail_open {
            return Err(BackendError::OpenError(format!(
                "{}: {message}",
                path.display()
            )));
        }
        self.open_documents.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockDocument {
            pages: self.pages.clone(),
            fail_page: self.fail_page,
            open_documents: Arc::clone(&self.open_documents),
        }))
    }
}

struct MockDocument {
    pages: Vec<PageContent>,
    fail_page: Option<usize>,
    open_documents: Arc<AtomicUsize>,
}

impl PdfDocument for MockDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        Ok(self.pages.len())
    }

    fn load_page(&self, index: usize) -> Result<PageContent, BackendError> {
        if self.fail_page == Some(index) {
            return Err(BackendError::ExtractionError(format!(
                "page {} is corrupt",
                index + 1
            )));
        }
        self.pages.get(index).cloned().ok_or_else(|| {
            BackendError::ExtractionError(format!("page index {index} out of range"))
        })
    }
}

impl Drop for MockDocument {
    fn drop(&mut self) {
        self.open_documents.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_released_on_drop() {
        let backend = MockBackend::new(vec![PageContent::blank(1, 10.0, 10.0)]);
        let doc = backend.open(Path::new("a.pdf")).unwrap();
        assert_eq!(backend.open_documents(), 1);
        assert_eq!(doc.page_count().unwrap(), 1);
        drop(doc);
        assert_eq!(backend.open_documents(), 0);
    }

    #[test]
    fn test_failing_open() {
        let backend = MockBackend::failing_open("not a PDF");
        let err = backend.open(Path::new("bad.pdf")).err().unwrap();
        assert!(err.to_string().contains("not a PDF"));
        assert_eq!(backend.open_documents(), 0);
    }

    #[test]
    fn test_out_of_range_page() {
        let backend = MockBackend::new(Vec::new());
        let doc = backend.open(Path::new("a.pdf")).unwrap();
        assert!(doc.load_page(0).is_err());
    }
}
