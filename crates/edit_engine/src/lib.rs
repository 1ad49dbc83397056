//! Edit Engine - Interactive editing surface for one card side
//!
//! The surface keeps a mutable scene of pixel-space objects in sync with the
//! canonical percentage-based model. Gestures mutate only the scene; nothing
//! reaches the template store until [`EditingSurface::commit`] rebuilds the
//! side's element array from the scene and writes it in one step.
//!
//! Images are placed immediately with a placeholder footprint. The host
//! drains decode requests with [`EditingSurface::take_load_requests`], runs
//! them through an [`ImageDecoder`] and hands the results back through
//! [`EditingSurface::finish_image_load`].

mod adapter;
mod config;
mod editor;
mod error;
mod image;
mod properties;
mod scene;

pub use adapter::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use image::*;
pub use properties::*;
pub use scene::*;
