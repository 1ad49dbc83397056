//! Render item types

use crate::Color;
use card_model::{
    ElementId, ElementKind, Face, ObjectFit, PixelRect, TemplateId, TextAlign, WritingMode,
};
use serde::{Deserialize, Serialize};

/// A rectangle in render coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

impl From<PixelRect> for Rect {
    fn from(r: PixelRect) -> Self {
        Self {
            x: r.left,
            y: r.top,
            width: r.width,
            height: r.height,
        }
    }
}

/// A text run laid into its element's bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRender {
    pub text: String,
    pub font_family: String,
    /// Font size in surface pixels
    pub font_size: f64,
    /// Numeric weight (400 normal, 700 bold)
    pub font_weight: u16,
    pub color: Color,
    pub background: Option<Color>,
    pub align: TextAlign,
    /// Letter spacing in surface pixels
    pub letter_spacing: f64,
    pub line_height: Option<f64>,
    pub writing_mode: WritingMode,
}

/// What a visual node draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeContent {
    Text(TextRender),
    Shape {
        fill: Color,
        corner_radius: f64,
    },
    Image {
        source: String,
        fit: ObjectFit,
        corner_radius: f64,
        grayscale: bool,
    },
    /// Stand-in for media that resolved to nothing; same footprint
    Placeholder {
        kind: ElementKind,
        fill: Color,
        corner_radius: f64,
    },
    Qr {
        value: String,
        foreground: Color,
        background: Color,
    },
    Icon {
        name: String,
        color: Color,
        size: f64,
    },
}

impl NodeContent {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// One painted element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    pub element_id: ElementId,
    /// Unrotated bounds in surface pixels
    pub bounds: Rect,
    /// Degrees in [0, 360), clockwise around the center of `bounds`
    pub rotation: f64,
    pub opacity: f64,
    pub content: NodeContent,
}

/// A fully resolved card side, bottom node first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideRender {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub background_image: Option<String>,
    pub nodes: Vec<VisualNode>,
}

impl SideRender {
    pub fn node(&self, id: &ElementId) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| &n.element_id == id)
    }
}

/// Both sides of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRender {
    pub template_id: TemplateId,
    pub front: SideRender,
    pub back: SideRender,
}

impl TemplateRender {
    pub fn side(&self, face: Face) -> &SideRender {
        match face {
            Face::Front => &self.front,
            Face::Back => &self.back,
        }
    }
}
