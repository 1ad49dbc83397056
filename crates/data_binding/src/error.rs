//! Error types for binding parsing

use thiserror::Error;

/// Reasons a binding string cannot be used
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    /// Not exactly one `{{identifier}}` placeholder
    #[error("Malformed binding: {0:?}")]
    Malformed(String),

    /// Well-formed placeholder naming a field the profile does not have
    #[error("Unknown binding field: {0}")]
    UnknownField(String),
}

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, BindingError>;
