//! CSS class allocation for style attributes.
//!
//! Every style slot of a text run (font, font size, colors, spacing, rise) is
//! deduplicated into a small integer class id. Line serialization emits only
//! class references; the stylesheet itself is rendered once per document from
//! the interned values.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::font::FontRef;
use crate::model::Color;
use crate::utils::fmt_number;

/// Number of style slots carried by a text-run state.
pub const ID_COUNT: usize = 7;

/// Style slots, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(usize)]
pub enum StyleSlot {
    Font = 0,
    FontSize,
    FillColor,
    StrokeColor,
    LetterSpace,
    WordSpace,
    Rise,
}

impl StyleSlot {
    pub const ALL: [StyleSlot; ID_COUNT] = [
        StyleSlot::Font,
        StyleSlot::FontSize,
        StyleSlot::FillColor,
        StyleSlot::StrokeColor,
        StyleSlot::LetterSpace,
        StyleSlot::WordSpace,
        StyleSlot::Rise,
    ];

    /// CSS class prefix for this slot.
    pub fn css_prefix(self) -> &'static str {
        match self {
            StyleSlot::Font => "ff",
            StyleSlot::FontSize => "fs",
            StyleSlot::FillColor => "fc",
            StyleSlot::StrokeColor => "sc",
            StyleSlot::LetterSpace => "ls",
            StyleSlot::WordSpace => "ws",
            StyleSlot::Rise => "rs",
        }
    }

    /// Bit for this slot in a state umask or diff-set.
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Umask with every slot meaningful.
pub const FULL_UMASK: u32 = (1 << ID_COUNT as u32) - 1;

/// Allocates stable CSS class ids for style values.
///
/// Ids must be equality-preserving: installing equal values yields equal ids.
/// With a deterministic allocator the serialized output is deterministic.
pub trait ClassAllocator {
    fn font_class(&mut self, font: &FontRef) -> i64;
    fn font_size_class(&mut self, size: f64) -> i64;
    fn fill_color_class(&mut self, color: &Color) -> i64;
    fn stroke_color_class(&mut self, color: &Color) -> i64;
    fn letter_space_class(&mut self, value: f64) -> i64;
    fn word_space_class(&mut self, value: f64) -> i64;
    fn rise_class(&mut self, value: f64) -> i64;
}

/// Insertion-ordered class allocator.
///
/// Scalar slots are keyed on the value quantized to 1/1000 (the precision of
/// the emitted CSS), colors on their 8-bit channel quantization, fonts on
/// their installer id.
#[derive(Debug, Default)]
pub struct StyleTable {
    fonts: IndexMap<i64, FontRef>,
    font_sizes: IndexMap<OrderedFloat<f64>, f64>,
    fill_colors: IndexMap<Option<(u8, u8, u8)>, Color>,
    stroke_colors: IndexMap<Option<(u8, u8, u8)>, Color>,
    letter_spaces: IndexMap<OrderedFloat<f64>, f64>,
    word_spaces: IndexMap<OrderedFloat<f64>, f64>,
    rises: IndexMap<OrderedFloat<f64>, f64>,
}

fn quantize(v: f64) -> OrderedFloat<f64> {
    OrderedFloat((v * 1000.0).round() / 1000.0)
}

fn intern_scalar(map: &mut IndexMap<OrderedFloat<f64>, f64>, v: f64) -> i64 {
    let entry = map.entry(quantize(v));
    let idx = entry.index();
    entry.or_insert(v);
    idx as i64
}

fn intern_color(map: &mut IndexMap<Option<(u8, u8, u8)>, Color>, color: &Color) -> i64 {
    let entry = map.entry(color.quantize());
    let idx = entry.index();
    entry.or_insert(*color);
    idx as i64
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one CSS rule per interned value, in id order.
    ///
    /// Stroke color uses the WebKit text-stroke property; rise maps to
    /// relative vertical positioning.
    pub fn css_rules(&self) -> Vec<String> {
        let mut rules = Vec::new();
        for (idx, font) in self.fonts.values().enumerate() {
            rules.push(format!(".ff{}{{font-family:ff{};}}", idx, font.id));
        }
        for (idx, size) in self.font_sizes.values().enumerate() {
            rules.push(format!(".fs{}{{font-size:{}px;}}", idx, fmt_number(*size)));
        }
        for (idx, color) in self.fill_colors.values().enumerate() {
            rules.push(format!(".fc{}{{color:{};}}", idx, color.to_css()));
        }
        for (idx, color) in self.stroke_colors.values().enumerate() {
            rules.push(format!(
                ".sc{}{{-webkit-text-stroke-color:{};}}",
                idx,
                color.to_css()
            ));
        }
        for (idx, v) in self.letter_spaces.values().enumerate() {
            rules.push(format!(".ls{}{{letter-spacing:{}px;}}", idx, fmt_number(*v)));
        }
        for (idx, v) in self.word_spaces.values().enumerate() {
            rules.push(format!(".ws{}{{word-spacing:{}px;}}", idx, fmt_number(*v)));
        }
        for (idx, v) in self.rises.values().enumerate() {
            rules.push(format!(
                ".rs{}{{position:relative;bottom:{}px;}}",
                idx,
                fmt_number(*v)
            ));
        }
        rules
    }
}

impl ClassAllocator for StyleTable {
    fn font_class(&mut self, font: &FontRef) -> i64 {
        let entry = self.fonts.entry(font.id);
        let idx = entry.index();
        entry.or_insert(*font);
        idx as i64
    }

    fn font_size_class(&mut self, size: f64) -> i64 {
        intern_scalar(&mut self.font_sizes, size)
    }

    fn fill_color_class(&mut self, color: &Color) -> i64 {
        intern_color(&mut self.fill_colors, color)
    }

    fn stroke_color_class(&mut self, color: &Color) -> i64 {
        intern_color(&mut self.stroke_colors, color)
    }

    fn letter_space_class(&mut self, value: f64) -> i64 {
        intern_scalar(&mut self.letter_spaces, value)
    }

    fn word_space_class(&mut self, value: f64) -> i64 {
        intern_scalar(&mut self.word_spaces, value)
    }

    fn rise_class(&mut self, value: f64) -> i64 {
        intern_scalar(&mut self.rises, value)
    }
}
