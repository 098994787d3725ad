//! Observed graphics state.
//!
//! The interpreter owns the PDF graphics state; the converter core only reads
//! it through this trait, between update callbacks and glyph batches.

use crate::font::PdfFont;
use crate::utils::{apply_matrix_pt, Matrix, Point};

/// Number of PDF text rendering modes.
pub const RENDER_MODE_COUNT: usize = 8;

/// Rendering modes in which the fill channel paints glyphs.
/// PDF 32000-1:2008, Table 106.
pub const FILL_ACTIVE: [bool; RENDER_MODE_COUNT] =
    [true, false, true, false, true, false, true, false];

/// Rendering modes in which the stroke channel paints glyphs.
pub const STROKE_ACTIVE: [bool; RENDER_MODE_COUNT] =
    [false, true, true, false, false, true, true, false];

/// Read-only view of the interpreter's current graphics and text state.
pub trait GfxState {
    /// Start-of-line position in text space (LineX, LineY).
    fn line_pos(&self) -> Point;

    /// Current position in text space (CurX, CurY).
    fn cur_pos(&self) -> Point;

    /// The current font object, if any.
    fn font(&self) -> Option<&dyn PdfFont>;

    /// Font size in user units.
    fn font_size(&self) -> f64;

    /// Horizontal scaling factor (1.0 = normal).
    fn horiz_scaling(&self) -> f64;

    /// Current transformation matrix (user space to device space).
    fn ctm(&self) -> Matrix;

    /// Text matrix (text space to user space).
    fn text_matrix(&self) -> Matrix;

    /// Character spacing.
    fn char_space(&self) -> f64;

    /// Word spacing.
    fn word_space(&self) -> f64;

    /// Text rise.
    fn rise(&self) -> f64;

    /// Text rendering mode, 0..8.
    fn render_mode(&self) -> u8;

    /// Current fill color as RGB.
    fn fill_rgb(&self) -> (f64, f64, f64);

    /// Current stroke color as RGB.
    fn stroke_rgb(&self) -> (f64, f64, f64);

    /// Transforms user-space coordinates to device space via the CTM.
    fn transform(&self, x: f64, y: f64) -> Point {
        apply_matrix_pt(self.ctm(), (x, y))
    }
}
