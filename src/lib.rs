//! sucre - text-state tracking and line buffering for PDF-to-HTML conversion.
//!
//! PDF describes text as positioned glyphs under a rich graphics state; HTML
//! wants nested inline boxes with CSS styling. This crate watches the
//! graphics state evolve glyph by glyph and emits the minimum sequence of
//! block elements, inline style changes, and horizontal offsets that
//! reproduces the layout.
//!
//! The interpreter drives an [`HtmlTextRenderer`] through the
//! [`GfxObserver`] update callbacks and
//! [`draw_glyphs`](converter::html::HtmlTextRenderer::draw_glyphs); the
//! renderer classifies each change, buffers the line, and serializes it to
//! the sink on flush. Fonts and CSS classes are deduplicated behind the
//! [`FontInstaller`] and [`ClassAllocator`] seams.

pub mod converter;
pub mod error;
pub mod font;
pub mod interp;
pub mod model;
pub mod params;
pub mod utils;

pub use converter::html::{HtmlTextRenderer, NewLineState};
pub use converter::line::{LineBuffer, Offset, State};
pub use converter::styles::{ClassAllocator, StyleSlot, StyleTable, ID_COUNT};
pub use error::{ConvertError, Result};
pub use font::{FontInstaller, FontRef, PdfFont, SimpleFontInstaller};
pub use interp::gfx::GfxState;
pub use interp::observer::GfxObserver;
pub use model::color::Color;
pub use model::state::{HtmlState, StateDelta};
pub use params::HtmlParams;
