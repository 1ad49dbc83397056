//! Card sides

use crate::{CardElement, CardModelError, ElementId, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which face of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
}

impl Face {
    /// The opposite face
    pub fn flipped(&self) -> Face {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// One face of a card: background plus positioned elements.
///
/// The order of `elements` is storage order only; paint order comes from
/// each element's `z_index` (see [`CardSide::paint_order`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSide {
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default)]
    pub elements: Vec<CardElement>,
}

impl CardSide {
    /// Create an empty side with the given background color
    pub fn new(background_color: impl Into<String>) -> Self {
        Self {
            background_color: background_color.into(),
            background_image: None,
            elements: Vec::new(),
        }
    }

    pub fn with_background_image(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }

    pub fn with_element(mut self, element: CardElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Elements sorted bottom-to-top: by `z_index`, ties broken by storage order
    pub fn paint_order(&self) -> Vec<&CardElement> {
        let mut ordered: Vec<(usize, &CardElement)> = self.elements.iter().enumerate().collect();
        ordered.sort_by_key(|(index, element)| (element.z_index, *index));
        ordered.into_iter().map(|(_, element)| element).collect()
    }

    /// The z-index that paints above every current element
    pub fn next_z_index(&self) -> i32 {
        self.elements
            .iter()
            .map(|e| e.z_index)
            .max()
            .map(|z| z.saturating_add(1))
            .unwrap_or(0)
    }

    /// Get an element by id
    pub fn element(&self, id: &ElementId) -> Option<&CardElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Check whether an element id exists on this side
    pub fn contains(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Check element id uniqueness and every element's ranges
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(&element.id) {
                return Err(CardModelError::DuplicateElementId(element.id.to_string()));
            }
            element.validate()?;
        }
        Ok(())
    }
}

impl Default for CardSide {
    fn default() -> Self {
        Self::new("#ffffff")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementKind, Geometry};

    fn element(id: &str, z: i32) -> CardElement {
        CardElement::new(id, ElementKind::Shape, Geometry::default()).with_z_index(z)
    }

    #[test]
    fn test_paint_order_uses_z_index_then_storage_order() {
        let side = CardSide::default()
            .with_element(element("top", 5))
            .with_element(element("first-tie", 1))
            .with_element(element("second-tie", 1))
            .with_element(element("bottom", -2));

        let ids: Vec<&str> = side.paint_order().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["bottom", "first-tie", "second-tie", "top"]);
    }

    #[test]
    fn test_next_z_index() {
        assert_eq!(CardSide::default().next_z_index(), 0);
        let side = CardSide::default().with_element(element("a", 3)).with_element(element("b", 7));
        assert_eq!(side.next_z_index(), 8);
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let side = CardSide::default().with_element(element("a", 0)).with_element(element("a", 1));
        assert_eq!(
            side.validate(),
            Err(CardModelError::DuplicateElementId("a".to_string()))
        );
    }

    #[test]
    fn test_face_flip() {
        assert_eq!(Face::Front.flipped(), Face::Back);
        assert_eq!(serde_json::to_string(&Face::Back).unwrap(), "\"back\"");
    }
}
