//! State-update callbacks driven by the interpreter.
//!
//! Each callback does the minimum bookkeeping (usually just a dirty flag);
//! the real work is deferred to the next classification pass, so a burst of
//! redundant updates between glyph batches costs nothing.

use super::gfx::GfxState;
use crate::utils::Matrix;

/// Update notifications from the PDF interpreter.
///
/// Implemented by the renderer. The interpreter must call these in content
/// order, strictly interleaved with glyph batches, from a single thread.
pub trait GfxObserver {
    /// Everything may have changed (page start, state restore).
    fn update_all(&mut self, gfx: &dyn GfxState);

    fn update_rise(&mut self, gfx: &dyn GfxState);

    /// The text position was set explicitly.
    fn update_text_pos(&mut self, gfx: &dyn GfxState);

    /// A TJ-style adjustment shifted the pen within the line.
    /// `shift` is in thousandths of text space.
    fn update_text_shift(&mut self, gfx: &dyn GfxState, shift: f64);

    fn update_font(&mut self, gfx: &dyn GfxState);

    /// The CTM was concatenated with the given matrix.
    fn update_ctm(&mut self, gfx: &dyn GfxState, m: Matrix);

    fn update_text_mat(&mut self, gfx: &dyn GfxState);

    fn update_horiz_scaling(&mut self, gfx: &dyn GfxState);

    fn update_char_space(&mut self, gfx: &dyn GfxState);

    fn update_word_space(&mut self, gfx: &dyn GfxState);

    /// The text rendering mode changed; affects which color channels paint.
    fn update_render(&mut self, gfx: &dyn GfxState);

    fn update_fill_color(&mut self, gfx: &dyn GfxState);

    fn update_stroke_color(&mut self, gfx: &dyn GfxState);

    fn update_fill_color_space(&mut self, gfx: &dyn GfxState);

    fn update_stroke_color_space(&mut self, gfx: &dyn GfxState);
}
