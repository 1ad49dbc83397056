//! Error types for card model operations

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CardModelError {
    #[error("Duplicate element id on side: {0}")]
    DuplicateElementId(String),

    #[error("Geometry out of range for element {id}: {field} = {value}")]
    GeometryOutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("Opacity out of range for element {id}: {value}")]
    OpacityOutOfRange { id: String, value: f64 },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}

pub type Result<T> = std::result::Result<T, CardModelError>;
