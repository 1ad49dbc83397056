//! Render Model - Static card rendering
//!
//! This crate turns a card side plus a data context into a flat visual tree
//! that any drawing backend can paint, without depending on the editing
//! surface. It uses the same coordinate transforms and binding resolution as
//! the editor, so a rendered card matches what was edited.

mod color;
mod error;
mod export;
mod render_item;
mod renderer;

pub use color::*;
pub use error::*;
pub use export::*;
pub use render_item::*;
pub use renderer::*;
