//! Tracked HTML text state.
//!
//! `HtmlState` is the snapshot of every style attribute that maps onto CSS
//! for an inline text run; `StateDelta` is the record of dirty flags set by
//! interpreter update callbacks and consumed by the classifier.

use super::color::Color;
use crate::font::FontRef;
use crate::utils::{Matrix, MATRIX_IDENTITY};

/// Snapshot of the style attributes of the current text run.
///
/// Spacing attributes (`letter_space`, `word_space`, `rise`) are stored
/// pre-multiplied by the draw text scale, i.e. in CSS units. `x`, `y` and
/// `transform_matrix` are only meaningful at a block boundary; of the
/// transform only the first four entries matter for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlState {
    pub font: FontRef,
    pub font_size: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub letter_space: f64,
    pub word_space: f64,
    pub rise: f64,
    pub x: f64,
    pub y: f64,
    pub transform_matrix: Matrix,
}

impl HtmlState {
    pub fn new() -> Self {
        Self {
            font: FontRef::null(),
            font_size: 0.0,
            fill_color: Color::Transparent,
            stroke_color: Color::Transparent,
            letter_space: 0.0,
            word_space: 0.0,
            rise: 0.0,
            x: 0.0,
            y: 0.0,
            transform_matrix: MATRIX_IDENTITY,
        }
    }
}

impl Default for HtmlState {
    fn default() -> Self {
        Self::new()
    }
}

/// Dirty flags set by the interpreter's update callbacks.
///
/// `all` forces every check in the next classification pass. Flags are
/// cleared as a unit once the pass completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateDelta {
    pub all: bool,
    pub rise: bool,
    pub text_pos: bool,
    pub font: bool,
    pub ctm: bool,
    pub text_mat: bool,
    pub hori_scale: bool,
    pub letter_space: bool,
    pub word_space: bool,
    pub fill_color: bool,
    pub stroke_color: bool,
}

impl StateDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every flag.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
