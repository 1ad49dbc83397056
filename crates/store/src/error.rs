//! Error types for template store operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Built-in templates cannot be deleted
    #[error("Template is built in and cannot be deleted: {0}")]
    ImmutableTemplate(String),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Card model error: {0}")]
    Model(#[from] card_model::CardModelError),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
