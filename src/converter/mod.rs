//! The converter core: state classification, line buffering, style interning.

pub mod html;
pub mod line;
pub mod styles;

pub use html::{HtmlTextRenderer, NewLineState};
pub use line::{LineBuffer, Offset, State};
pub use styles::{ClassAllocator, StyleSlot, StyleTable, FULL_UMASK, ID_COUNT};
