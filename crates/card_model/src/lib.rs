//! Card Model - Core card template structures and types
//!
//! This crate provides the canonical model shared by the template store,
//! the editing surface and the static renderer: positioned elements with
//! percentage geometry, two-sided templates, the profile data context that
//! bindings resolve against, and the percentage/pixel coordinate transforms.

mod ids;
mod error;
mod element;
mod side;
mod template;
mod context;
pub mod style;
pub mod coords;
pub mod builtin;

pub use ids::*;
pub use error::*;
pub use element::*;
pub use side::*;
pub use template::*;
pub use context::*;
pub use style::*;
pub use coords::{to_percent, to_percent_clamped, to_pixels, PixelRect, Surface};
