//! Card element types
//!
//! An element is one positioned, styled visual unit on a card side. Geometry
//! is stored as percentages of the card surface so the same element renders
//! identically at any pixel size.

use crate::{CardModelError, ElementId, ElementStyles, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of card element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Shape,
    Image,
    Qr,
    Icon,
}

impl ElementKind {
    /// All element kinds, in toolbar order
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Text,
        ElementKind::Shape,
        ElementKind::Image,
        ElementKind::Qr,
        ElementKind::Icon,
    ];

    /// Whether the element's resolved value is a media source rather than display text
    pub fn shows_media(&self) -> bool {
        matches!(self, Self::Image)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Shape => write!(f, "shape"),
            Self::Image => write!(f, "image"),
            Self::Qr => write!(f, "qr"),
            Self::Icon => write!(f, "icon"),
        }
    }
}

/// Position and size as percentages of the card surface, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(deserialize_with = "deserialize_percent")]
    pub x: f64,
    #[serde(deserialize_with = "deserialize_percent")]
    pub y: f64,
    #[serde(deserialize_with = "deserialize_percent")]
    pub width: f64,
    #[serde(deserialize_with = "deserialize_percent")]
    pub height: f64,
}

impl Geometry {
    /// Create a geometry, clamping every field into [0, 100]
    pub fn clamped(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
            width: clamp_percent(width),
            height: clamp_percent(height),
        }
    }

    /// A `width` x `height` box centered on the card
    pub fn centered(width: f64, height: f64) -> Self {
        let width = clamp_percent(width);
        let height = clamp_percent(height);
        Self::clamped((100.0 - width) / 2.0, (100.0 - height) / 2.0, width, height)
    }

    /// Check that every field is a finite value in [0, 100]
    pub fn is_in_range(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && (0.0..=100.0).contains(v))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::centered(40.0, 10.0)
    }
}

/// Clamp a percentage into [0, 100]; NaN becomes 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn deserialize_percent<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_percent)
}

/// Normalize a rotation in degrees into [0, 360)
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// A positioned, styled element on a card side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Rotation in degrees (any real value; see [`CardElement::display_rotation`])
    #[serde(default)]
    pub rotation: f64,
    /// Reserved for gesture blocking
    #[serde(default)]
    pub locked: bool,
    /// Paint order; higher paints later
    #[serde(default)]
    pub z_index: i32,
    /// Placeholder of the form `{{identifier}}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_binding: Option<String>,
    /// Literal value, used only when there is no binding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub styles: ElementStyles,
}

impl CardElement {
    /// Create a new element
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            kind,
            geometry,
            rotation: 0.0,
            locked: false,
            z_index: 0,
            data_binding: None,
            content: None,
            styles: ElementStyles::default(),
        }
    }

    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.data_binding = Some(binding.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_styles(mut self, styles: ElementStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Rotation normalized into [0, 360) for display
    pub fn display_rotation(&self) -> f64 {
        normalize_rotation(self.rotation)
    }

    /// Whether the element is bound to profile data
    pub fn is_bound(&self) -> bool {
        self.data_binding.is_some()
    }

    /// Validate geometry and opacity ranges
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("x", self.geometry.x),
            ("y", self.geometry.y),
            ("width", self.geometry.width),
            ("height", self.geometry.height),
        ];
        for (field, value) in fields {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(CardModelError::GeometryOutOfRange {
                    id: self.id.to_string(),
                    field,
                    value,
                });
            }
        }

        if let Some(opacity) = self.styles.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(CardModelError::OpacityOutOfRange {
                    id: self.id.to_string(),
                    value: opacity,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_geometry() {
        let g = Geometry::centered(40.0, 10.0);
        assert_eq!(g, Geometry { x: 30.0, y: 45.0, width: 40.0, height: 10.0 });
    }

    #[test]
    fn test_clamped_geometry() {
        let g = Geometry::clamped(-5.0, 120.0, f64::NAN, 50.0);
        assert_eq!(g, Geometry { x: 0.0, y: 100.0, width: 0.0, height: 50.0 });
        assert!(g.is_in_range());
    }

    #[test]
    fn test_display_rotation() {
        let e = CardElement::new("a", ElementKind::Shape, Geometry::default()).with_rotation(-90.0);
        assert_eq!(e.display_rotation(), 270.0);
        assert_eq!(normalize_rotation(720.0), 0.0);
        assert_eq!(normalize_rotation(405.0), 45.0);
        assert_eq!(e.rotation, -90.0);
    }

    #[test]
    fn test_element_json_shape() {
        let geometry = Geometry::clamped(50.0, 0.0, 50.0, 85.0);
        let element = CardElement::new("portrait", ElementKind::Image, geometry)
            .with_binding("{{profileImage}}")
            .with_z_index(1);

        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["id"], "portrait");
        assert_eq!(json["type"], "image");
        assert_eq!(json["x"], 50.0);
        assert_eq!(json["height"], 85.0);
        assert_eq!(json["zIndex"], 1);
        assert_eq!(json["dataBinding"], "{{profileImage}}");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_deserialize_clamps_geometry_and_defaults() {
        let json = r#"{"id":"t","type":"text","x":-3,"y":10,"width":150,"height":5}"#;
        let element: CardElement = serde_json::from_str(json).unwrap();

        assert_eq!(element.geometry.x, 0.0);
        assert_eq!(element.geometry.width, 100.0);
        assert_eq!(element.rotation, 0.0);
        assert!(!element.locked);
        assert_eq!(element.z_index, 0);
        assert!(element.styles.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_opacity() {
        let mut e = CardElement::new("a", ElementKind::Text, Geometry::default());
        e.styles.opacity = Some(1.5);
        assert!(matches!(e.validate(), Err(CardModelError::OpacityOutOfRange { .. })));
    }

    #[test]
    fn test_validate_rejects_out_of_range_geometry() {
        let mut e = CardElement::new("a", ElementKind::Text, Geometry::default());
        e.geometry.width = 101.0;
        assert!(matches!(
            e.validate(),
            Err(CardModelError::GeometryOutOfRange { field: "width", .. })
        ));
    }
}
