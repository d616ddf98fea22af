//! Page-by-page PDF text extraction.
//!
//! A [`PdfBackend`] turns a file into [`PageContent`] values (positioned
//! glyphs). [`TextExtractor`] groups those glyphs into words and lines, renders
//! each page to text, and joins the pages with [`PAGE_BREAK`].

pub mod backend;
pub mod extract;
pub mod layout;
pub mod mock;
pub mod model;
pub mod options;
pub mod words;

pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use extract::{ExtractError, PAGE_BREAK, TextExtractor, join_pages};
pub use layout::LayoutError;
pub use model::{PageContent, TextChar, Word};
pub use options::{ExtractOptions, ExtractOptionsBuilder, OptionsError};
