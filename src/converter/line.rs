//! Line buffering.
//!
//! A text line accumulates three parallel sequences — glyphs, horizontal
//! offsets, and style-state snapshots — until the renderer flushes it. Flush
//! optimizes the sequences, then serializes the line as one block element
//! with nested inline spans and offset elements.

use std::io::Write;

use crate::converter::styles::{ClassAllocator, StyleSlot, FULL_UMASK, ID_COUNT};
use crate::error::Result;
use crate::model::HtmlState;
use crate::params::HtmlParams;
use crate::utils::{fmt_number, mat_prefix_equal, MATRIX_IDENTITY};

/// A horizontal shift of `width` CSS px, injected before `text[start_idx]`.
#[derive(Debug, Clone, Copy)]
pub struct Offset {
    pub start_idx: usize,
    pub width: f64,
}

/// A frozen style state taking effect at glyph index `start_idx`.
///
/// `ids` are the class-allocator indices for the seven style slots;
/// `hash_umask` marks which slots are meaningful (color slots are masked out
/// in fallback mode) and `hash_value` hashes the masked ids for cheap
/// comparison.
#[derive(Debug, Clone)]
pub struct State {
    pub html: HtmlState,
    pub ids: [i64; ID_COUNT],
    pub start_idx: usize,
    pub hash_value: u64,
    pub hash_umask: u32,
    pub need_close: bool,
}

impl State {
    pub(crate) fn from_html(
        html: &HtmlState,
        start_idx: usize,
        styles: &mut dyn ClassAllocator,
        fallback: bool,
    ) -> Self {
        let mut ids = [0_i64; ID_COUNT];
        let mut umask = FULL_UMASK;
        ids[StyleSlot::Font as usize] = styles.font_class(&html.font);
        ids[StyleSlot::FontSize as usize] = styles.font_size_class(html.font_size);
        if fallback {
            umask &= !(StyleSlot::FillColor.bit() | StyleSlot::StrokeColor.bit());
        } else {
            ids[StyleSlot::FillColor as usize] = styles.fill_color_class(&html.fill_color);
            ids[StyleSlot::StrokeColor as usize] = styles.stroke_color_class(&html.stroke_color);
        }
        ids[StyleSlot::LetterSpace as usize] = styles.letter_space_class(html.letter_space);
        ids[StyleSlot::WordSpace as usize] = styles.word_space_class(html.word_space);
        ids[StyleSlot::Rise as usize] = styles.rise_class(html.rise);

        let hash_value = hash_ids(&ids, umask);
        Self {
            html: html.clone(),
            ids,
            start_idx,
            hash_value,
            hash_umask: umask,
            need_close: false,
        }
    }

    /// Bitset of slots whose ids differ, restricted to the slots meaningful
    /// in both states.
    pub fn diff(&self, other: &State) -> u32 {
        let mask = self.hash_umask & other.hash_umask;
        let mut bits = 0;
        for slot in StyleSlot::ALL {
            if mask & slot.bit() != 0 && self.ids[slot as usize] != other.ids[slot as usize] {
                bits |= slot.bit();
            }
        }
        bits
    }

    /// The width a literal space character would produce under this state,
    /// in CSS px.
    pub fn single_space_offset(&self) -> f64 {
        self.html.word_space + self.html.letter_space + self.html.font.space_width * self.html.font_size
    }

    /// The emitted CSS font size; offsets are expressed relative to it.
    pub fn em_size(&self) -> f64 {
        self.html.font_size
    }

    /// Writes the opening tag of an inline span carrying the classes for the
    /// slots in `class_bits`.
    fn begin<W: Write + ?Sized>(&self, out: &mut W, class_bits: u32) -> Result<()> {
        out.write_all(b"<span class=\"")?;
        self.write_classes(out, class_bits, false)?;
        out.write_all(b"\">")?;
        Ok(())
    }

    /// Closes the span opened by `begin`.
    fn end<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        debug_assert!(self.need_close);
        out.write_all(b"</span>")?;
        Ok(())
    }

    fn write_classes<W: Write + ?Sized>(
        &self,
        out: &mut W,
        class_bits: u32,
        leading_space: bool,
    ) -> Result<()> {
        let mut first = !leading_space;
        for slot in StyleSlot::ALL {
            if class_bits & self.hash_umask & slot.bit() == 0 {
                continue;
            }
            if !first {
                out.write_all(b" ")?;
            }
            first = false;
            write!(out, "{}{}", slot.css_prefix(), self.ids[slot as usize])?;
        }
        Ok(())
    }
}

fn hash_ids(ids: &[i64; ID_COUNT], umask: u32) -> u64 {
    // FNV-1a over the meaningful slots, tagged by slot index
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for slot in StyleSlot::ALL {
        if umask & slot.bit() != 0 {
            h ^= ((slot as u64) << 56) ^ (ids[slot as usize] as u64);
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
    h
}

/// Accumulates one text line and serializes it on flush.
///
/// The buffer is owned by the renderer and reused across lines; every flush
/// leaves it empty.
#[derive(Debug)]
pub struct LineBuffer {
    params: HtmlParams,
    text: Vec<char>,
    offsets: Vec<Offset>,
    states: Vec<State>,
    // span-nesting stack, reused across flushes
    stack: Vec<usize>,
}

impl LineBuffer {
    pub fn new(params: HtmlParams) -> Self {
        Self {
            params,
            text: Vec::new(),
            offsets: Vec::new(),
            states: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.offsets.is_empty() && self.states.is_empty()
    }

    /// Appends glyphs under the most recent state.
    pub fn append_unicodes(&mut self, codes: &[char]) {
        self.text.extend_from_slice(codes);
    }

    /// Appends a horizontal shift of `width` CSS px before the next glyph.
    /// Consecutive offsets at the same position coalesce by summation.
    pub fn append_offset(&mut self, width: f64) {
        let start_idx = self.text.len();
        if let Some(last) = self.offsets.last_mut() {
            if last.start_idx == start_idx {
                last.width += width;
                return;
            }
        }
        self.offsets.push(Offset { start_idx, width });
    }

    /// Snapshots `html_state` as the state for glyphs appended from here on.
    /// A previous state at the same position is replaced.
    pub fn append_state(&mut self, html_state: &HtmlState, styles: &mut dyn ClassAllocator) {
        let start_idx = self.text.len();
        let state = State::from_html(html_state, start_idx, styles, self.params.fallback);
        if let Some(last) = self.states.last_mut() {
            if last.start_idx == start_idx {
                *last = state;
                return;
            }
        }
        self.states.push(state);
    }

    /// Serializes the buffered line to `out` and resets the buffer.
    ///
    /// An empty buffer flushes to nothing.
    pub fn flush<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<()> {
        if self.text.is_empty() {
            self.clear();
            return Ok(());
        }
        self.optimize();
        if self.states.is_empty() {
            // a line is always opened through a state snapshot
            debug_assert!(false, "line flushed without a state");
            self.clear();
            return Ok(());
        }
        debug_assert_eq!(self.states[0].start_idx, 0);

        self.write_line_open(out)?;

        self.stack.clear();
        self.stack.push(0);
        let mut si = 1;
        let mut oi = 0;
        let mut buf = [0_u8; 4];
        for idx in 0..=self.text.len() {
            if si < self.states.len() && self.states[si].start_idx == idx && idx < self.text.len() {
                // close open spans that conflict with the incoming state
                while self.stack.len() > 1 {
                    let top = *self.stack.last().unwrap();
                    if self.states[top].diff(&self.states[si]) != 0 {
                        self.states[top].end(out)?;
                        self.stack.pop();
                    } else {
                        break;
                    }
                }
                let top = *self.stack.last().unwrap();
                let bits = self.states[top].diff(&self.states[si]);
                if bits != 0 {
                    self.states[si].begin(out, bits)?;
                    self.states[si].need_close = true;
                    self.stack.push(si);
                }
                si += 1;
            }
            if oi < self.offsets.len() && self.offsets[oi].start_idx == idx {
                let effective = *self.stack.last().unwrap();
                let width = self.offsets[oi].width;
                self.write_offset(out, effective, width)?;
                oi += 1;
            }
            if idx < self.text.len() {
                match self.text[idx] {
                    '&' => out.write_all(b"&amp;")?,
                    '<' => out.write_all(b"&lt;")?,
                    '>' => out.write_all(b"&gt;")?,
                    ch => out.write_all(ch.encode_utf8(&mut buf).as_bytes())?,
                }
            }
        }
        while self.stack.len() > 1 {
            let top = self.stack.pop().unwrap();
            self.states[top].end(out)?;
        }
        out.write_all(b"</div>\n")?;

        self.clear();
        Ok(())
    }

    /// Pre-flush optimization: drop negligible offsets and states that are
    /// indistinguishable from their effective predecessor.
    fn optimize(&mut self) {
        let offset_eps = self.params.offset_eps;
        self.offsets.retain(|o| o.width.abs() >= offset_eps);

        let mut kept: Vec<State> = Vec::with_capacity(self.states.len());
        for state in self.states.drain(..) {
            match kept.last() {
                Some(prev)
                    if prev.hash_umask == state.hash_umask
                        && prev.hash_value == state.hash_value
                        && prev.diff(&state) == 0 => {}
                _ => kept.push(state),
            }
        }
        self.states = kept;
    }

    fn clear(&mut self) {
        self.text.clear();
        self.offsets.clear();
        self.states.clear();
    }

    fn write_line_open<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let s0 = &self.states[0];
        out.write_all(b"<div class=\"l")?;
        s0.write_classes(out, s0.hash_umask, true)?;
        write!(
            out,
            "\" style=\"left:{}px;bottom:{}px",
            fmt_number(s0.html.x),
            fmt_number(s0.html.y)
        )?;
        let tm = &s0.html.transform_matrix;
        if !mat_prefix_equal(tm, &MATRIX_IDENTITY, self.params.eps) {
            write!(
                out,
                ";transform:matrix({},{},{},{},0,0);transform-origin:0 0",
                fmt_number(tm.0),
                fmt_number(tm.1),
                fmt_number(tm.2),
                fmt_number(tm.3)
            )?;
        }
        out.write_all(b"\">")?;
        Ok(())
    }

    fn write_offset<W: Write + ?Sized>(
        &self,
        out: &mut W,
        effective: usize,
        width: f64,
    ) -> Result<()> {
        let state = &self.states[effective];
        let em = state.em_size();
        if em > self.params.eps {
            if (width - state.single_space_offset()).abs() <= self.params.space_threshold * em {
                out.write_all(b" ")?;
            } else {
                let width_em = width / em;
                if width_em >= 0.0 {
                    write!(
                        out,
                        "<span class=\"g\" style=\"width:{}em\"></span>",
                        fmt_number(width_em)
                    )?;
                } else {
                    write!(
                        out,
                        "<span class=\"g\" style=\"margin-left:{}em\"></span>",
                        fmt_number(width_em)
                    )?;
                }
            }
        } else if width >= 0.0 {
            // no em basis yet for this line; fall back to absolute units
            write!(
                out,
                "<span class=\"g\" style=\"width:{}px\"></span>",
                fmt_number(width)
            )?;
        } else {
            write!(
                out,
                "<span class=\"g\" style=\"margin-left:{}px\"></span>",
                fmt_number(width)
            )?;
        }
        Ok(())
    }
}
