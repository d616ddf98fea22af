use thiserror::Error;

/// Default horizontal merge distance, in points.
pub const DEFAULT_X_TOLERANCE: f32 = 2.0;
/// Default vertical merge distance, in points.
pub const DEFAULT_Y_TOLERANCE: f32 = 2.0;
/// Points per character column in layout mode.
pub const DEFAULT_X_DENSITY: f32 = 7.25;
/// Points per text row in layout mode.
pub const DEFAULT_Y_DENSITY: f32 = 13.0;

#[derive(Error, Debug, PartialEq)]
pub enum OptionsError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidTolerance { name: &'static str, value: f32 },
    #[error("{name} must be a finite, positive number (got {value})")]
    InvalidDensity { name: &'static str, value: f32 },
}

/// Parameters for turning positioned glyphs into text.
///
/// Use [`ExtractOptionsBuilder`] to construct validated non-default options.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Maximum horizontal gap between glyphs of the same word.
    pub(crate) x_tolerance: f32,
    /// Maximum vertical offset between glyphs of the same line.
    pub(crate) y_tolerance: f32,
    /// Render onto a character grid that mirrors the page geometry.
    pub(crate) layout: bool,
    /// Treat whitespace glyphs as part of words instead of word breaks.
    pub(crate) keep_blank_chars: bool,
    pub(crate) x_density: f32,
    pub(crate) y_density: f32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            x_tolerance: DEFAULT_X_TOLERANCE,
            y_tolerance: DEFAULT_Y_TOLERANCE,
            layout: true,
            keep_blank_chars: false,
            x_density: DEFAULT_X_DENSITY,
            y_density: DEFAULT_Y_DENSITY,
        }
    }
}

impl ExtractOptions {
    pub fn builder() -> ExtractOptionsBuilder {
        ExtractOptionsBuilder::new()
    }

    pub fn x_tolerance(&self) -> f32 {
        self.x_tolerance
    }

    pub fn y_tolerance(&self) -> f32 {
        self.y_tolerance
    }

    pub fn layout(&self) -> bool {
        self.layout
    }

    pub fn keep_blank_chars(&self) -> bool {
        self.keep_blank_chars
    }
}

/// Builder for [`ExtractOptions`].
///
/// Unset fields fall back to the defaults. [`build()`](Self::build) rejects
/// negative or non-finite tolerances and non-positive densities.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptionsBuilder {
    x_tolerance: Option<f32>,
    y_tolerance: Option<f32>,
    layout: Option<bool>,
    keep_blank_chars: Option<bool>,
    x_density: Option<f32>,
    y_density: Option<f32>,
}

impl ExtractOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_tolerance(mut self, points: f32) -> Self {
        self.x_tolerance = Some(points);
        self
    }

    pub fn y_tolerance(mut self, points: f32) -> Self {
        self.y_tolerance = Some(points);
        self
    }

    pub fn layout(mut self, enabled: bool) -> Self {
        self.layout = Some(enabled);
        self
    }

    pub fn keep_blank_chars(mut self, keep: bool) -> Self {
        self.keep_blank_chars = Some(keep);
        self
    }

    /// Points per character column in layout mode.
    pub fn x_density(mut self, points: f32) -> Self {
        self.x_density = Some(points);
        self
    }

    /// Points per text row in layout mode.
    pub fn y_density(mut self, points: f32) -> Self {
        self.y_density = Some(points);
        self
    }

    pub fn build(self) -> Result<ExtractOptions, OptionsError> {
        let tolerance = |name: &'static str, value: Option<f32>, default: f32| {
            let value = value.unwrap_or(default);
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(OptionsError::InvalidTolerance { name, value })
            }
        };
        let density = |name: &'static str, value: Option<f32>, default: f32| {
            let value = value.unwrap_or(default);
            if value.is_finite() && value > 0.0 {
                Ok(value)
            } else {
                Err(OptionsError::InvalidDensity { name, value })
            }
        };

        Ok(ExtractOptions {
            x_tolerance: tolerance("x_tolerance", self.x_tolerance, DEFAULT_X_TOLERANCE)?,
            y_tolerance: tolerance("y_tolerance", self.y_tolerance, DEFAULT_Y_TOLERANCE)?,
            layout: self.layout.unwrap_or(true),
            keep_blank_chars: self.keep_blank_chars.unwrap_or(false),
            x_density: density("x_density", self.x_density, DEFAULT_X_DENSITY)?,
            y_density: density("y_density", self.y_density, DEFAULT_Y_DENSITY)?,
        })
    }
}
