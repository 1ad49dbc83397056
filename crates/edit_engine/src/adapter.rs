//! Mapping from scene handles back to model elements

use crate::ObjectHandle;
use card_model::{ElementId, ElementStyles, Geometry, PixelRect};
use std::collections::HashMap;

/// How a loaded element was stored, so an untouched object commits back as it was
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPlacement {
    /// Index in the side's element array
    pub slot: usize,
    pub z_index: i32,
    pub geometry: Geometry,
    /// Canvas rect the geometry mapped to at load
    pub rect: PixelRect,
    pub styles: ElementStyles,
}

/// Model-side identity of a scene object
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSource {
    pub element_id: ElementId,
    pub data_binding: Option<String>,
    /// Literal content: text for unbound text, url for unbound images,
    /// icon name for icons
    pub content: Option<String>,
    /// `None` for objects created in this session
    pub stored: Option<StoredPlacement>,
}

impl ElementSource {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            element_id,
            data_binding: None,
            content: None,
            stored: None,
        }
    }

    pub fn with_binding(mut self, binding: Option<String>) -> Self {
        self.data_binding = binding;
        self
    }

    pub fn with_content(mut self, content: Option<String>) -> Self {
        self.content = content;
        self
    }

    pub fn with_stored(mut self, stored: StoredPlacement) -> Self {
        self.stored = Some(stored);
        self
    }
}

/// Handle to element lookup owned by the editor
#[derive(Debug, Clone, Default)]
pub struct AdapterMap {
    entries: HashMap<ObjectHandle, ElementSource>,
}

impl AdapterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: ObjectHandle, source: ElementSource) {
        self.entries.insert(handle, source);
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&ElementSource> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut ElementSource> {
        self.entries.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<ElementSource> {
        self.entries.remove(&handle)
    }

    /// Find the handle currently standing in for an element
    pub fn handle_for(&self, element_id: &ElementId) -> Option<ObjectHandle> {
        self.entries
            .iter()
            .find(|(_, source)| &source.element_id == element_id)
            .map(|(handle, _)| *handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
