//! Element style bag
//!
//! Every field is optional; an absent field means "use the renderer default".
//! Partial updates from the properties surface are expressed as another
//! `ElementStyles` holding only the changed fields and applied with
//! [`ElementStyles::merge`].

use crate::ElementKind;
use serde::{Deserialize, Serialize};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// Numeric CSS-style weight
    pub fn numeric(&self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Medium => 500,
            Self::Semibold => 600,
            Self::Bold => 700,
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::Normal
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl Default for TextAlign {
    fn default() -> Self {
        Self::Left
    }
}

/// How an image fills its footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    Cover,
    Contain,
    Fill,
}

impl Default for ObjectFit {
    fn default() -> Self {
        Self::Cover
    }
}

/// Text flow direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritingMode {
    HorizontalTb,
    VerticalRl,
    VerticalLr,
}

impl Default for WritingMode {
    fn default() -> Self {
        Self::HorizontalTb
    }
}

/// Visual styles of a card element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Font size in pixels at the reference card width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Opacity (0.0 to 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing_mode: Option<WritingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
}

impl ElementStyles {
    /// Create an empty style bag
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_border_radius(mut self, radius: f64) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn with_letter_spacing(mut self, spacing: f64) -> Self {
        self.letter_spacing = Some(spacing);
        self
    }

    pub fn with_writing_mode(mut self, mode: WritingMode) -> Self {
        self.writing_mode = Some(mode);
        self
    }

    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = Some(grayscale);
        self
    }

    pub fn with_object_fit(mut self, fit: ObjectFit) -> Self {
        self.object_fit = Some(fit);
        self
    }

    /// Overlay `other` on top of these styles (fields set in `other` win)
    pub fn merge(&self, other: &ElementStyles) -> ElementStyles {
        ElementStyles {
            color: other.color.clone().or_else(|| self.color.clone()),
            background_color: other
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            font_size: other.font_size.or(self.font_size),
            font_weight: other.font_weight.or(self.font_weight),
            font_family: other.font_family.clone().or_else(|| self.font_family.clone()),
            text_align: other.text_align.or(self.text_align),
            border_radius: other.border_radius.or(self.border_radius),
            opacity: other.opacity.or(self.opacity).map(|o| o.clamp(0.0, 1.0)),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
            line_height: other.line_height.or(self.line_height),
            writing_mode: other.writing_mode.or(self.writing_mode),
            grayscale: other.grayscale.or(self.grayscale),
            object_fit: other.object_fit.or(self.object_fit),
        }
    }

    /// Keep only the fields an element of `kind` renders
    pub fn retain_for(&self, kind: ElementKind) -> ElementStyles {
        let common = ElementStyles {
            opacity: self.opacity,
            ..Default::default()
        };

        match kind {
            ElementKind::Text => ElementStyles {
                color: self.color.clone(),
                background_color: self.background_color.clone(),
                font_size: self.font_size,
                font_weight: self.font_weight,
                font_family: self.font_family.clone(),
                text_align: self.text_align,
                letter_spacing: self.letter_spacing,
                line_height: self.line_height,
                writing_mode: self.writing_mode,
                ..common
            },
            ElementKind::Shape => ElementStyles {
                background_color: self.background_color.clone(),
                border_radius: self.border_radius,
                ..common
            },
            ElementKind::Image => ElementStyles {
                border_radius: self.border_radius,
                grayscale: self.grayscale,
                object_fit: self.object_fit,
                ..common
            },
            ElementKind::Qr => ElementStyles {
                color: self.color.clone(),
                background_color: self.background_color.clone(),
                ..common
            },
            ElementKind::Icon => ElementStyles {
                color: self.color.clone(),
                font_size: self.font_size,
                ..common
            },
        }
    }

    /// Effective opacity, defaulting to fully opaque
    pub fn effective_opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Check if all properties are None
    pub fn is_empty(&self) -> bool {
        *self == ElementStyles::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_patch_wins() {
        let base = ElementStyles::new()
            .with_color("#111111")
            .with_font_size(18.0)
            .with_font_weight(FontWeight::Normal);
        let patch = ElementStyles::new().with_font_weight(FontWeight::Bold);

        let merged = base.merge(&patch);
        assert_eq!(merged.font_weight, Some(FontWeight::Bold));
        assert_eq!(merged.font_size, Some(18.0));
        assert_eq!(merged.color.as_deref(), Some("#111111"));
    }

    #[test]
    fn test_merge_clamps_opacity() {
        let patch = ElementStyles {
            opacity: Some(3.0),
            ..Default::default()
        };
        assert_eq!(ElementStyles::new().merge(&patch).opacity, Some(1.0));
    }

    #[test]
    fn test_retain_for_shape_drops_text_fields() {
        let styles = ElementStyles::new()
            .with_font_size(12.0)
            .with_background_color("#ff0000")
            .with_border_radius(8.0)
            .with_opacity(0.5);

        let shape = styles.retain_for(ElementKind::Shape);
        assert_eq!(shape.font_size, None);
        assert_eq!(shape.background_color.as_deref(), Some("#ff0000"));
        assert_eq!(shape.border_radius, Some(8.0));
        assert_eq!(shape.opacity, Some(0.5));
    }

    #[test]
    fn test_empty_fields_are_not_serialized() {
        let json = serde_json::to_string(&ElementStyles::new().with_font_size(14.0)).unwrap();
        assert_eq!(json, r#"{"fontSize":14.0}"#);
    }

    #[test]
    fn test_enum_wire_names() {
        let styles = ElementStyles::new()
            .with_font_weight(FontWeight::Semibold)
            .with_writing_mode(WritingMode::VerticalRl)
            .with_object_fit(ObjectFit::Contain);
        let json = serde_json::to_value(&styles).unwrap();
        assert_eq!(json["fontWeight"], "semibold");
        assert_eq!(json["writingMode"], "vertical-rl");
        assert_eq!(json["objectFit"], "contain");
    }
}
