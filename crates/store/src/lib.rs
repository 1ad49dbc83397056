//! Store - Card template persistence and CRUD
//!
//! This crate owns the canonical collection of card templates (built-in and
//! custom) together with the active/selected template ids. Every write
//! replaces the whole collection snapshot, so readers never observe a
//! half-written element array, and the result is saved through an injected
//! key-value persistence port.

mod config;
mod error;
mod manager;
mod persistence;
mod snapshot;


pub use config::*;
pub use error::*;
pub use manager::*;
pub use persistence::*;
pub use snapshot::*;
