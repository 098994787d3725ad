//! HTML text renderer.
//!
//! Tracks the PDF graphics state as the interpreter reports changes, decides
//! per glyph batch whether the text can continue the current inline run,
//! needs a new styled span, or must open a new block, and feeds the line
//! buffer accordingly.

use std::io::Write;

use crate::converter::line::LineBuffer;
use crate::converter::styles::ClassAllocator;
use crate::error::Result;
use crate::font::FontInstaller;
use crate::interp::gfx::{GfxState, FILL_ACTIVE, RENDER_MODE_COUNT, STROKE_ACTIVE};
use crate::interp::observer::GfxObserver;
use crate::model::{Color, HtmlState, StateDelta};
use crate::params::HtmlParams;
use crate::utils::{
    approx_eq, is_positive, mat_equal, mat_prefix_equal, mult_matrix, Matrix, MATRIX_IDENTITY,
};

/// Classifier verdict for the next glyph batch.
///
/// `None`: append to the current run. `Span`: the run continues with an
/// inline style change. `Div`: the state change cannot be expressed within
/// the current block; open a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NewLineState {
    None,
    Span,
    Div,
}

/// Renderer core: state classifier plus line lifecycle.
///
/// Driven by the interpreter through [`GfxObserver`] callbacks and
/// [`draw_glyphs`](HtmlTextRenderer::draw_glyphs). Single-threaded; owns all
/// of its state.
pub struct HtmlTextRenderer<W: Write, F: FontInstaller, C: ClassAllocator> {
    params: HtmlParams,
    out: W,
    fonts: F,
    styles: C,

    line: LineBuffer,
    line_opened: bool,
    new_line_state: NewLineState,
    delta: StateDelta,

    cur_html_state: HtmlState,
    cur_font_size: f64,
    cur_text_tm: Matrix,
    draw_text_scale: f64,

    // text-space pen position as observed through updates, and the position
    // at which the current HTML line was opened
    cur_tx: f64,
    cur_ty: f64,
    draw_tx: f64,
    draw_ty: f64,
}

impl<W: Write, F: FontInstaller, C: ClassAllocator> HtmlTextRenderer<W, F, C> {
    pub fn new(out: W, params: HtmlParams, fonts: F, styles: C) -> Self {
        let line = LineBuffer::new(params.clone());
        let mut renderer = Self {
            params,
            out,
            fonts,
            styles,
            line,
            line_opened: false,
            new_line_state: NewLineState::Div,
            delta: StateDelta::new(),
            cur_html_state: HtmlState::new(),
            cur_font_size: 0.0,
            cur_text_tm: MATRIX_IDENTITY,
            draw_text_scale: 1.0,
            cur_tx: 0.0,
            cur_ty: 0.0,
            draw_tx: 0.0,
            draw_ty: 0.0,
        };
        renderer.reset_state();
        renderer
    }

    /// The verdict of the most recent classification pass.
    pub fn new_line_state(&self) -> NewLineState {
        self.new_line_state
    }

    pub fn line_opened(&self) -> bool {
        self.line_opened
    }

    /// The style state the next glyphs will be buffered under.
    pub fn cur_html_state(&self) -> &HtmlState {
        &self.cur_html_state
    }

    pub fn draw_text_scale(&self) -> f64 {
        self.draw_text_scale
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn styles(&self) -> &C {
        &self.styles
    }

    /// Consumes the renderer and returns the sink.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Resets all tracked state to document defaults and marks everything
    /// changed, so the next classification treats the state as new.
    pub fn reset_state(&mut self) {
        self.draw_text_scale = 1.0;
        self.cur_font_size = 0.0;
        self.cur_text_tm = MATRIX_IDENTITY;

        self.cur_html_state = HtmlState::new();
        self.cur_html_state.font = self.fonts.install_font(None);

        self.cur_tx = 0.0;
        self.cur_ty = 0.0;
        self.draw_tx = 0.0;
        self.draw_ty = 0.0;

        self.delta.clear();
        self.delta.all = true;
    }

    /// Classifies the pending state changes against the current line.
    ///
    /// Reads the graphics state and the dirty flags, updates the tracked
    /// HTML state and running scalars, and leaves the verdict in
    /// [`new_line_state`](Self::new_line_state). The verdict only ever
    /// rises within one pass. Total: every input combination yields a
    /// verdict.
    pub fn check_state_change(&mut self, gfx: &dyn GfxState) {
        // Dependency order below is load-bearing: font size and transform
        // feed the draw-scale factoring, the factored scale feeds the
        // spacing attributes, and the transform feeds the position merge.
        self.new_line_state = NewLineState::None;
        let eps = self.params.eps;

        let mut need_recheck_position = false;
        let mut need_rescale_font = false;
        let mut draw_text_scale_changed = false;

        // text position: tracked incrementally by the update callbacks
        if self.delta.all || self.delta.text_pos {
            need_recheck_position = true;
        }

        // font id and size
        if self.delta.all || self.delta.font {
            let new_font = self.fonts.install_font(gfx.font());
            if new_font != self.cur_html_state.font {
                // Type 3 advance widths are unreliable; isolate such text in
                // its own absolutely positioned block so the error cannot
                // spill into neighboring runs.
                if new_font.is_type3 || self.cur_html_state.font.is_type3 {
                    self.raise(NewLineState::Div);
                } else {
                    self.raise(NewLineState::Span);
                }
                self.cur_html_state.font = new_font;
            }

            let new_font_size = gfx.font_size();
            if !approx_eq(self.cur_font_size, new_font_size, eps) {
                need_rescale_font = true;
                self.cur_font_size = new_font_size;
            }
        }

        // composed transform: CTM * text matrix, with horizontal scaling
        // folded into the first column
        let old_tm = self.cur_text_tm;
        if self.delta.all || self.delta.ctm || self.delta.text_mat || self.delta.hori_scale {
            let hori_scale = gfx.horiz_scaling();
            let mut new_text_tm = mult_matrix(gfx.text_matrix(), gfx.ctm());
            new_text_tm.0 *= hori_scale;
            new_text_tm.1 *= hori_scale;

            if !mat_equal(&new_text_tm, &self.cur_text_tm, eps) {
                need_recheck_position = true;
                need_rescale_font = true;
                self.cur_text_tm = new_text_tm;
            }
        }

        // factor the draw scale out of the transform: font size 1 under
        // matrix [10 0 0 10] becomes font size 10 under the identity, which
        // browsers render far better
        if need_rescale_font {
            let mut new_tm = self.cur_text_tm;
            let mut new_scale = new_tm.2.hypot(new_tm.3) / self.params.text_scale_factor;
            let mut new_font_size = self.cur_font_size;

            if is_positive(new_scale, eps) {
                new_font_size *= new_scale;
                new_tm.0 /= new_scale;
                new_tm.1 /= new_scale;
                new_tm.2 /= new_scale;
                new_tm.3 /= new_scale;
            } else {
                new_scale = 1.0;
            }

            if !is_positive(new_font_size, eps) {
                // flipped page: CSS cannot render a negative font size
                new_font_size = -new_font_size;
                new_tm.0 = -new_tm.0;
                new_tm.1 = -new_tm.1;
                new_tm.2 = -new_tm.2;
                new_tm.3 = -new_tm.3;
            }

            if !approx_eq(new_scale, self.draw_text_scale, eps) {
                draw_text_scale_changed = true;
                self.draw_text_scale = new_scale;
            }

            if !approx_eq(new_font_size, self.cur_html_state.font_size, eps) {
                self.raise(NewLineState::Span);
                self.cur_html_state.font_size = new_font_size;
            }

            if !mat_prefix_equal(&new_tm, &self.cur_html_state.transform_matrix, eps) {
                self.raise(NewLineState::Div);
                self.cur_html_state.transform_matrix = new_tm;
            }
        }

        // try to express the position change as a pen shift within the
        // current line; pointless once a new block is forced
        if need_recheck_position && self.new_line_state < NewLineState::Div {
            if !self.merge_position_offset(&old_tm, eps) {
                self.raise(NewLineState::Div);
            }
        }

        // letter space, scaled into CSS units
        if self.delta.all || self.delta.letter_space || draw_text_scale_changed {
            let new_letter_space = gfx.char_space() * self.draw_text_scale;
            if !approx_eq(new_letter_space, self.cur_html_state.letter_space, eps) {
                self.cur_html_state.letter_space = new_letter_space;
                self.raise(NewLineState::Span);
            }
        }

        // word space
        if self.delta.all || self.delta.word_space || draw_text_scale_changed {
            let new_word_space = gfx.word_space() * self.draw_text_scale;
            if !approx_eq(new_word_space, self.cur_html_state.word_space, eps) {
                self.cur_html_state.word_space = new_word_space;
                self.raise(NewLineState::Span);
            }
        }

        // rise
        if self.delta.all || self.delta.rise || draw_text_scale_changed {
            let new_rise = gfx.rise() * self.draw_text_scale;
            if !approx_eq(new_rise, self.cur_html_state.rise, eps) {
                self.cur_html_state.rise = new_rise;
                self.raise(NewLineState::Span);
            }
        }

        // fill color: which channels paint depends on the rendering mode
        if !self.params.fallback && (self.delta.all || self.delta.fill_color) {
            let mode = render_mode_index(gfx);
            let new_fill_color = if FILL_ACTIVE[mode] {
                let (r, g, b) = gfx.fill_rgb();
                Color::Rgb(r, g, b)
            } else {
                Color::Transparent
            };
            if new_fill_color != self.cur_html_state.fill_color {
                self.cur_html_state.fill_color = new_fill_color;
                self.raise(NewLineState::Span);
            }
        }

        // stroke color
        if !self.params.fallback && (self.delta.all || self.delta.stroke_color) {
            let mode = render_mode_index(gfx);
            let new_stroke_color = if STROKE_ACTIVE[mode] {
                let (r, g, b) = gfx.stroke_rgb();
                Color::Rgb(r, g, b)
            } else {
                Color::Transparent
            };
            if new_stroke_color != self.cur_html_state.stroke_color {
                self.cur_html_state.stroke_color = new_stroke_color;
                self.raise(NewLineState::Span);
            }
        }

        self.delta.clear();
    }

    /// Solves for a horizontal pen shift `dx` that carries the line origin
    /// to the new text position under the previous transform:
    ///
    /// ```text
    /// CurTM * (cur_tx, cur_ty, 1)^T = OldTM * (draw_tx + dx, draw_ty, 1)^T
    /// ```
    ///
    /// Appends the offset and resyncs the draw position on success. Returns
    /// false when no such shift exists (the new block case).
    fn merge_position_offset(&mut self, old_tm: &Matrix, eps: f64) -> bool {
        // baselines can only stay parallel if the linear parts agree
        if !mat_prefix_equal(old_tm, &self.cur_text_tm, eps) {
            return false;
        }

        let lhs1 = self.cur_text_tm.4
            - old_tm.4
            - old_tm.2 * (self.draw_ty - self.cur_ty)
            - old_tm.0 * (self.draw_tx - self.cur_tx);
        let lhs2 = self.cur_text_tm.5
            - old_tm.5
            - old_tm.3 * (self.draw_ty - self.cur_ty)
            - old_tm.1 * (self.draw_tx - self.cur_tx);

        // the two equations must agree on dx
        if !approx_eq(old_tm.0 * lhs2, old_tm.1 * lhs1, eps) {
            return false;
        }

        // TODO: vertical writing mode needs the symmetric dy solve here
        let dx = if !approx_eq(old_tm.0, 0.0, eps) {
            lhs1 / old_tm.0
        } else if !approx_eq(old_tm.1, 0.0, eps) {
            lhs2 / old_tm.1
        } else if approx_eq(lhs1, 0.0, eps) && approx_eq(lhs2, 0.0, eps) {
            // degenerate columns and zero residual: the position change is
            // unobservable under this transform
            0.0
        } else {
            log::warn!("degenerate text transform, starting a new block");
            return false;
        };

        self.line.append_offset(dx * self.draw_text_scale);
        self.draw_tx = self.cur_tx;
        self.draw_ty = self.cur_ty;
        true
    }

    /// Applies the pending verdict before a glyph batch: closes and reopens
    /// the line on a block break, otherwise aligns the pen position, and
    /// snapshots the state when it changed.
    pub fn prepare_text_line(&mut self, gfx: &dyn GfxState) -> Result<()> {
        if !self.line_opened {
            self.new_line_state = NewLineState::Div;
        }

        if self.new_line_state == NewLineState::Div {
            self.close_text_line()?;

            // the block records its position in device space
            let (cur_x, cur_y) = gfx.cur_pos();
            let (x, y) = gfx.transform(cur_x, cur_y);
            self.cur_html_state.x = x;
            self.cur_html_state.y = y;

            self.draw_tx = self.cur_tx;
            self.draw_ty = self.cur_ty;
        } else {
            // align the pen with the tracked text position
            let target = (self.cur_tx - self.draw_tx) * self.draw_text_scale;
            if !approx_eq(target, 0.0, self.params.eps) {
                self.line.append_offset(target);
                self.draw_tx += target / self.draw_text_scale;
            }
        }

        if self.new_line_state != NewLineState::None {
            self.line.append_state(&self.cur_html_state, &mut self.styles);
        }

        self.line_opened = true;
        Ok(())
    }

    /// Flushes the current line, if one is open.
    pub fn close_text_line(&mut self) -> Result<()> {
        if self.line_opened {
            self.line_opened = false;
            self.line.flush(&mut self.out)?;
        }
        Ok(())
    }

    /// Entry point per text-showing operator: classify, settle the line,
    /// append the glyph batch.
    pub fn draw_glyphs(&mut self, gfx: &dyn GfxState, codes: &[char]) -> Result<()> {
        self.check_state_change(gfx);
        self.prepare_text_line(gfx)?;
        self.line.append_unicodes(codes);
        Ok(())
    }

    /// Ends the page: closes any open line and flushes the sink.
    pub fn end_page(&mut self) -> Result<()> {
        self.close_text_line()?;
        self.out.flush()?;
        Ok(())
    }

    fn raise(&mut self, state: NewLineState) {
        if state > self.new_line_state {
            self.new_line_state = state;
        }
    }
}

/// Validated rendering-mode index.
///
/// An index outside 0..8 is a caller contract violation; release builds
/// degrade to the invisible mode.
fn render_mode_index(gfx: &dyn GfxState) -> usize {
    let mode = gfx.render_mode() as usize;
    debug_assert!(mode < RENDER_MODE_COUNT, "rendering mode out of range");
    if mode >= RENDER_MODE_COUNT {
        log::warn!("rendering mode {mode} out of range, treating text as invisible");
        return 3;
    }
    mode
}

impl<W: Write, F: FontInstaller, C: ClassAllocator> GfxObserver for HtmlTextRenderer<W, F, C> {
    fn update_all(&mut self, gfx: &dyn GfxState) {
        self.delta.all = true;
        self.update_text_pos(gfx);
    }

    fn update_rise(&mut self, _gfx: &dyn GfxState) {
        self.delta.rise = true;
    }

    fn update_text_pos(&mut self, gfx: &dyn GfxState) {
        self.delta.text_pos = true;
        let (line_x, line_y) = gfx.line_pos();
        self.cur_tx = line_x;
        self.cur_ty = line_y;
    }

    fn update_text_shift(&mut self, gfx: &dyn GfxState, shift: f64) {
        self.delta.text_pos = true;
        self.cur_tx -= shift * 0.001 * gfx.font_size() * gfx.horiz_scaling();
    }

    fn update_font(&mut self, _gfx: &dyn GfxState) {
        self.delta.font = true;
    }

    fn update_ctm(&mut self, _gfx: &dyn GfxState, _m: Matrix) {
        self.delta.ctm = true;
    }

    fn update_text_mat(&mut self, _gfx: &dyn GfxState) {
        self.delta.text_mat = true;
    }

    fn update_horiz_scaling(&mut self, _gfx: &dyn GfxState) {
        self.delta.hori_scale = true;
    }

    fn update_char_space(&mut self, _gfx: &dyn GfxState) {
        self.delta.letter_space = true;
    }

    fn update_word_space(&mut self, _gfx: &dyn GfxState) {
        self.delta.word_space = true;
    }

    fn update_render(&mut self, _gfx: &dyn GfxState) {
        // the rendering mode is traced through the color channels
        self.delta.fill_color = true;
        self.delta.stroke_color = true;
    }

    fn update_fill_color(&mut self, _gfx: &dyn GfxState) {
        self.delta.fill_color = true;
    }

    fn update_stroke_color(&mut self, _gfx: &dyn GfxState) {
        self.delta.stroke_color = true;
    }

    fn update_fill_color_space(&mut self, _gfx: &dyn GfxState) {
        self.delta.fill_color = true;
    }

    fn update_stroke_color_space(&mut self, _gfx: &dyn GfxState) {
        self.delta.stroke_color = true;
    }
}
