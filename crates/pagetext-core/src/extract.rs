use std::path::Path;

use thiserror::Error;

use crate::backend::{BackendError, PdfBackend};
use crate::layout::{LayoutError, render_page};
use crate::model::PageContent;
use crate::options::ExtractOptions;

/// Separator placed between the text of consecutive pages.
pub const PAGE_BREAK: &str = "\n--- PAGE BREAK ---\n";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("page {page}: {source}")]
    Layout {
        page: usize,
        #[source]
        source: LayoutError,
    },
}

/// Join per-page text with [`PAGE_BREAK`]. No separator trails the last page.
pub fn join_pages(pages: &[String]) -> String {
    pages.join(PAGE_BREAK)
}

/// Page-by-page text extraction over a [`PdfBackend`].
pub struct TextExtractor<'a> {
    backend: &'a dyn PdfBackend,
    options: ExtractOptions,
}

impl<'a> TextExtractor<'a> {
    pub fn new(backend: &'a dyn PdfBackend) -> Self {
        Self {
            backend,
            options: ExtractOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Reconstruct the text of a single, already loaded page.
    pub fn page_text(&self, page: &PageContent) -> Result<String, ExtractError> {
        render_page(page, &self.options).map_err(|source| ExtractError::Layout {
            page: page.number,
            source,
        })
    }

    /// Extract the text of every page, in document order.
    ///
    /// The document is released before this returns, on success or on the
    /// first failing page.
    pub fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        let document = self.backend.open(path)?;
        let page_count = document.page_count()?;
        tracing::debug!(path = %path.display(), page_count, "opened document");

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let page = document.load_page(index)?;
            let text = self.page_text(&page)?;
            tracing::debug!(
                page = page.number,
                chars = page.chars.len(),
                empty = text.is_empty(),
                "extracted page"
            );
            pages.push(text);
        }
        Ok(pages)
    }

    /// Extract every page and join them with [`PAGE_BREAK`].
    pub fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let pages = self.extract_pages(path)?;
        Ok(join_pages(&pages))
    }
}
