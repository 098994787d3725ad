//! Interfaces between the PDF interpreter and the converter core.

pub mod gfx;
pub mod observer;

pub use gfx::GfxState;
pub use observer::GfxObserver;
