/// A single glyph positioned on a page.
///
/// Coordinates are in PDF points with the origin at the top-left corner of the
/// page box and `y` growing downward.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChar {
    pub text: char,
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
    pub bottom: f32,
    /// `false` for rotated or vertical text.
    pub upright: bool,
}

impl TextChar {
    /// An upright glyph with the given bounding box.
    pub fn new(text: char, x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            text,
            x0,
            x1,
            top,
            bottom,
            upright: true,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_whitespace()
    }
}

/// The glyphs of one page, in content-stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// 1-based page number.
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub chars: Vec<TextChar>,
}

impl PageContent {
    pub fn new(number: usize, width: f32, height: f32, chars: Vec<TextChar>) -> Self {
        Self {
            number,
            width,
            height,
            chars,
        }
    }

    /// A page with no text layer (e.g. a scanned image).
    pub fn blank(number: usize, width: f32, height: f32) -> Self {
        Self::new(number, width, height, Vec::new())
    }
}

/// A run of glyphs merged by the tolerance rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
    pub bottom: f32,
    pub upright: bool,
}

impl Word {
    pub(crate) fn from_chars(chars: &[&TextChar]) -> Option<Self> {
        let first = chars.first()?;
        let mut word = Word {
            text: String::with_capacity(chars.len()),
            x0: first.x0,
            x1: first.x1,
            top: first.top,
            bottom: first.bottom,
            upright: first.upright,
        };
        for c in chars {
            word.text.push(c.text);
            word.x0 = word.x0.min(c.x0);
            word.x1 = word.x1.max(c.x1);
            word.top = word.top.min(c.top);
            word.bottom = word.bottom.max(c.bottom);
        }
        Some(word)
    }

    /// Number of grid cells the word occupies in layout mode.
    pub(crate) fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
