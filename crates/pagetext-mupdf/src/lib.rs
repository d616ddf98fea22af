use std::path::Path;

use mupdf::{Document, Quad, TextPageFlags};

use pagetext_core::{BackendError, PageContent, PdfBackend, PdfDocument, TextChar};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island. It isolates the mupdf dependency
/// (which is AGPL-3.0) so that the text reconstruction code does not
/// transitively depend on it.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        // Surface a missing or unreadable file as an IO error before MuPDF
        // folds it into a generic open failure.
        std::fs::metadata(path)?;

        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;
        tracing::debug!(path = path_str, "opened PDF with MuPDF");

        Ok(Box::new(MupdfDocument { document }))
    }
}

/// An open MuPDF document. Dropping it closes the file.
struct MupdfDocument {
    document: Document,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        let count = self
            .document
            .page_count()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        usize::try_from(count)
            .map_err(|_| BackendError::ExtractionError(format!("invalid page count {count}")))
    }

    fn load_page(&self, index: usize) -> Result<PageContent, BackendError> {
        let number = index + 1;
        let page_index = i32::try_from(index)
            .map_err(|_| BackendError::ExtractionError(format!("page {number} out of range")))?;

        let page = self
            .document
            .load_page(page_index)
            .map_err(|e| BackendError::ExtractionError(format!("page {number}: {e}")))?;
        let bounds = page
            .bounds()
            .map_err(|e| BackendError::ExtractionError(format!("page {number}: {e}")))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(format!("page {number}: {e}")))?;

        let origin = (bounds.x0, bounds.y0);
        let mut chars = Vec::new();
        let mut unmapped = 0usize;
        for block in text_page.blocks() {
            for line in block.lines() {
                for c in line.chars() {
                    let text = c.char().unwrap_or_else(|| {
                        unmapped += 1;
                        '\u{FFFD}'
                    });
                    chars.push(glyph_to_char(text, quad_corners(&c.quad()), origin));
                }
            }
        }

        tracing::debug!(page = number, chars = chars.len(), unmapped, "loaded page");

        Ok(PageContent::new(
            number,
            bounds.x1 - bounds.x0,
            bounds.y1 - bounds.y0,
            chars,
        ))
    }
}

/// Largest coordinate skew (points) still treated as axis-aligned.
const AXIS_EPSILON: f32 = 0.5;

/// Corners of a glyph quad in `[ul, ur, ll, lr]` order.
fn quad_corners(quad: &Quad) -> [(f32, f32); 4] {
    [
        (quad.ul.x, quad.ul.y),
        (quad.ur.x, quad.ur.y),
        (quad.ll.x, quad.ll.y),
        (quad.lr.x, quad.lr.y),
    ]
}

/// Build a [`TextChar`] from a glyph quad, relative to the page box origin.
///
/// MuPDF already reports device space with `y` growing downward, so the box is
/// the axis-aligned hull of the quad shifted by the page origin.
fn glyph_to_char(text: char, corners: [(f32, f32); 4], origin: (f32, f32)) -> TextChar {
    let (xs, ys): (Vec<f32>, Vec<f32>) = corners.iter().copied().unzip();
    let min = |v: &[f32]| v.iter().copied().fold(f32::INFINITY, f32::min);
    let max = |v: &[f32]| v.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    // Upright means the baseline runs along the x axis, in either direction.
    let [ul, ur, _, _] = corners;
    let upright = (ur.1 - ul.1).abs() < AXIS_EPSILON && (ur.0 - ul.0).abs() >= AXIS_EPSILON;

    TextChar {
        text,
        x0: min(&xs) - origin.0,
        x1: max(&xs) - origin.0,
        top: min(&ys) - origin.1,
        bottom: max(&ys) - origin.1,
        upright,
    }
}
