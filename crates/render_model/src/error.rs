//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
