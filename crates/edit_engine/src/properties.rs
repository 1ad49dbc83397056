//! Properties surface
//!
//! What the properties panel shows for the selected object depends on its
//! kind. Text adds typography; shapes add corner radius and explicit size;
//! images, QR codes and icons show only the common fields.

use crate::SceneObject;
use card_model::{ElementKind, FontWeight, TextAlign};
use serde::{Deserialize, Serialize};

/// An editable property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyField {
    X,
    Y,
    Rotation,
    Fill,
    Opacity,
    FontSize,
    FontWeight,
    TextAlign,
    BorderRadius,
    Width,
    Height,
}

const COMMON: [PropertyField; 5] = [
    PropertyField::X,
    PropertyField::Y,
    PropertyField::Rotation,
    PropertyField::Fill,
    PropertyField::Opacity,
];

/// Properties every kind exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonProperties {
    /// Left edge in canvas pixels
    pub x: f64,
    /// Top edge in canvas pixels
    pub y: f64,
    pub rotation: f64,
    /// Text/foreground color, or the fill of a shape
    pub fill: Option<String>,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    pub font_size: Option<f64>,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    pub border_radius: f64,
    pub width: f64,
    pub height: f64,
}

/// The property panel for one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPanel {
    pub kind: ElementKind,
    pub common: CommonProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeProperties>,
}

impl PropertyPanel {
    pub fn for_object(object: &SceneObject) -> Self {
        let styles = &object.styles;
        let fill = match object.kind {
            ElementKind::Shape => styles.background_color.clone(),
            ElementKind::Image => None,
            ElementKind::Text | ElementKind::Qr | ElementKind::Icon => styles.color.clone(),
        };

        let text = (object.kind == ElementKind::Text).then(|| TextProperties {
            font_size: styles.font_size,
            font_weight: styles.font_weight.unwrap_or_default(),
            text_align: styles.text_align.unwrap_or_default(),
        });
        let shape = (object.kind == ElementKind::Shape).then(|| ShapeProperties {
            border_radius: styles.border_radius.unwrap_or(0.0),
            width: object.rect.width,
            height: object.rect.height,
        });

        Self {
            kind: object.kind,
            common: CommonProperties {
                x: object.rect.left,
                y: object.rect.top,
                rotation: object.rotation,
                fill,
                opacity: styles.effective_opacity(),
            },
            text,
            shape,
        }
    }

    /// Fields shown for this panel, in display order
    pub fn fields(&self) -> Vec<PropertyField> {
        fields_for(self.kind)
    }
}

/// Fields shown for an element kind, in display order
pub fn fields_for(kind: ElementKind) -> Vec<PropertyField> {
    let mut fields = COMMON.to_vec();
    match kind {
        ElementKind::Text => fields.extend([
            PropertyField::FontSize,
            PropertyField::FontWeight,
            PropertyField::TextAlign,
        ]),
        ElementKind::Shape => fields.extend([
            PropertyField::BorderRadius,
            PropertyField::Width,
            PropertyField::Height,
        ]),
        ElementKind::Image | ElementKind::Qr | ElementKind::Icon => {}
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_by_kind() {
        assert!(fields_for(ElementKind::Text).contains(&PropertyField::FontWeight));
        assert!(!fields_for(ElementKind::Text).contains(&PropertyField::BorderRadius));
        assert!(fields_for(ElementKind::Shape).contains(&PropertyField::Width));
        assert_eq!(fields_for(ElementKind::Image), COMMON.to_vec());
        assert_eq!(fields_for(ElementKind::Qr), fields_for(ElementKind::Icon));
    }
}
