//! Value types tracked by the converter core.

pub mod color;
pub mod state;

pub use color::Color;
pub use state::{HtmlState, StateDelta};
