//! Error types for editing operations

use crate::ObjectHandle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Unknown scene object: {0}")]
    UnknownHandle(ObjectHandle),

    #[error("Object {handle} is a {kind} element")]
    KindMismatch {
        handle: ObjectHandle,
        kind: card_model::ElementKind,
    },

    #[error("Nothing is selected")]
    NoSelection,

    #[error("No template side is loaded")]
    NoSession,

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
}

pub type Result<T> = std::result::Result<T, EditError>;
