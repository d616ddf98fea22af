//! Rendering words back into page text.
//!
//! Plain mode joins words with single spaces and lines with newlines. Layout
//! mode places every word on a character grid sized from the page box, so
//! columns, indentation and vertical gaps survive in the output.

use thiserror::Error;

use crate::model::{PageContent, Word};
use crate::options::ExtractOptions;
use crate::words::{cluster_by, extract_words};

/// Largest layout grid (columns plus newline, times rows) a page may need.
pub const MAX_GRID_CELLS: u64 = 1 << 24;

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error(
        "page box of {width}x{height}pt needs a {cols}x{rows} character grid (limit {limit} cells)",
        limit = MAX_GRID_CELLS
    )]
    GridTooLarge {
        width: f32,
        height: f32,
        cols: i64,
        rows: i64,
    },
}

/// Reconstruct the text of one page.
///
/// A page with no words (no text layer, or only whitespace glyphs) yields an
/// empty string in both modes. In layout mode, words placed beyond the page
/// box are pinned to its right or bottom edge.
pub fn render_page(page: &PageContent, options: &ExtractOptions) -> Result<String, LayoutError> {
    let words = extract_words(&page.chars, options);
    if words.is_empty() {
        return Ok(String::new());
    }

    let lines = group_lines(words, options.y_tolerance);
    if options.layout {
        let grid = Grid::for_page(page, options)?;
        Ok(render_layout(&lines, grid, options))
    } else {
        Ok(render_plain(&lines))
    }
}

struct Line {
    top: f32,
    words: Vec<Word>,
}

fn group_lines(words: Vec<Word>, y_tolerance: f32) -> Vec<Line> {
    cluster_by(words, |w| w.top, y_tolerance)
        .into_iter()
        .map(|mut words| {
            // Clusters are sorted by top, so the first word is the highest.
            let top = words[0].top;
            words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            Line { top, words }
        })
        .collect()
}

fn render_plain(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            line.words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grid position of a coordinate, rounding half to even.
fn grid_cell(coord: f32, density: f32) -> i64 {
    (coord / density).round_ties_even() as i64
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

/// Dimensions of the layout grid, in characters.
#[derive(Debug, Clone, Copy)]
struct Grid {
    cols: usize,
    rows: i64,
}

impl Grid {
    fn for_page(page: &PageContent, options: &ExtractOptions) -> Result<Self, LayoutError> {
        let cols = grid_cell(page.width, options.x_density).max(0);
        let rows = grid_cell(page.height, options.y_density).max(0);

        let cells = (cols as u64)
            .checked_add(1)
            // Every line pads to the full width, even on a zero-row grid.
            .and_then(|c| c.checked_mul(rows.max(1) as u64));
        match cells {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(Self {
                cols: cols as usize,
                rows,
            }),
            _ => Err(LayoutError::GridTooLarge {
                width: page.width,
                height: page.height,
                cols,
                rows,
            }),
        }
    }
}

fn render_layout(lines: &[Line], grid: Grid, options: &ExtractOptions) -> String {
    let Grid { cols, rows } = grid;

    let mut out = String::with_capacity((cols + 1) * rows as usize);
    let mut newlines: i64 = 0;

    for (i, line) in lines.iter().enumerate() {
        let row = grid_cell(line.top, options.y_density).min(rows - 1);
        let prepend = i64::from(i > 0).max(row - newlines);
        for _ in 0..prepend {
            if out.is_empty() || out.ends_with('\n') {
                push_spaces(&mut out, cols);
            }
            out.push('\n');
        }
        newlines += prepend;

        let mut col: i64 = 0;
        for word in &line.words {
            let target = grid_cell(word.x0, options.x_density).min(cols as i64);
            let spaces = col.min(1).max(target - col);
            push_spaces(&mut out, spaces as usize);
            col += spaces;
            out.push_str(&word.text);
            col += word.char_len() as i64;
        }
        if (col as usize) < cols {
            push_spaces(&mut out, cols - col as usize);
        }
    }

    let append = rows - (newlines + 1);
    for i in 0..append {
        if i > 0 {
            push_spaces(&mut out, cols);
        }
        out.push('\n');
    }
    if out.ends_with('\n') {
        out.pop();
    }
    out
}
