//! Card side to visual tree conversion

use crate::{
    parse_color, Color, NodeContent, Rect, SideRender, TemplateRender, TextRender, VisualNode,
};
use card_model::{to_pixels, CardElement, CardSide, CardTemplate, DataContext, ElementKind, Surface};
use data_binding::{resolve_element, resolve_media};
use serde::{Deserialize, Serialize};

/// Configuration for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side background when the stored color is unusable
    pub background: Color,
    /// Default text color
    pub text_color: Color,
    /// Default font family
    pub font_family: String,
    /// Default font size at the reference card width
    pub font_size: f64,
    /// Default shape fill
    pub shape_fill: Color,
    /// Fill of placeholder boxes
    pub placeholder_fill: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text_color: Color::BLACK,
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            shape_fill: Color::rgb(0xd9, 0xe2, 0xec),
            placeholder_fill: Color::rgb(0xe4, 0xe7, 0xeb),
        }
    }
}

/// Renders card sides without an editing surface
#[derive(Debug, Clone, Default)]
pub struct StaticRenderer {
    config: RenderConfig,
}

impl StaticRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one side onto a `width` x `height` surface.
    ///
    /// Nodes are stacked by `zIndex`, ties in storage order. Identical inputs
    /// always produce identical output.
    pub fn render(
        &self,
        side: &CardSide,
        ctx: &DataContext,
        width: f64,
        height: f64,
    ) -> SideRender {
        let scale = Surface::new(width, height).font_scale();
        let nodes = side
            .paint_order()
            .into_iter()
            .map(|element| self.render_element(element, ctx, width, height, scale))
            .collect();

        SideRender {
            width,
            height,
            background: self.color_or(&side.background_color, self.config.background),
            background_image: side
                .background_image
                .clone()
                .filter(|s| !s.trim().is_empty()),
            nodes,
        }
    }

    /// Render both faces of a template
    pub fn render_template(
        &self,
        template: &CardTemplate,
        ctx: &DataContext,
        width: f64,
        height: f64,
    ) -> TemplateRender {
        TemplateRender {
            template_id: template.id.clone(),
            front: self.render(&template.front, ctx, width, height),
            back: self.render(&template.back, ctx, width, height),
        }
    }

    fn render_element(
        &self,
        element: &CardElement,
        ctx: &DataContext,
        width: f64,
        height: f64,
        scale: f64,
    ) -> VisualNode {
        let styles = &element.styles;
        let corner_radius = styles.border_radius.unwrap_or(0.0).max(0.0) * scale;

        let placeholder = || NodeContent::Placeholder {
            kind: element.kind,
            fill: self.config.placeholder_fill,
            corner_radius,
        };

        let content = match element.kind {
            ElementKind::Text => NodeContent::Text(TextRender {
                text: resolve_element(element, ctx),
                font_family: styles
                    .font_family
                    .clone()
                    .unwrap_or_else(|| self.config.font_family.clone()),
                font_size: styles.font_size.unwrap_or(self.config.font_size) * scale,
                font_weight: styles.font_weight.unwrap_or_default().numeric(),
                color: self.optional_color(styles.color.as_deref(), self.config.text_color),
                background: styles.background_color.as_deref().and_then(parse_color),
                align: styles.text_align.unwrap_or_default(),
                letter_spacing: styles.letter_spacing.unwrap_or(0.0) * scale,
                line_height: styles.line_height,
                writing_mode: styles.writing_mode.unwrap_or_default(),
            }),
            ElementKind::Shape => NodeContent::Shape {
                fill: self
                    .optional_color(styles.background_color.as_deref(), self.config.shape_fill),
                corner_radius,
            },
            ElementKind::Image => match resolve_media(element, ctx) {
                Some(source) => NodeContent::Image {
                    source,
                    fit: styles.object_fit.unwrap_or_default(),
                    corner_radius,
                    grayscale: styles.grayscale.unwrap_or(false),
                },
                None => placeholder(),
            },
            ElementKind::Qr => {
                let value = resolve_element(element, ctx);
                if value.trim().is_empty() {
                    placeholder()
                } else {
                    NodeContent::Qr {
                        value,
                        foreground: self.optional_color(styles.color.as_deref(), Color::BLACK),
                        background: self
                            .optional_color(styles.background_color.as_deref(), Color::WHITE),
                    }
                }
            }
            ElementKind::Icon => NodeContent::Icon {
                name: resolve_element(element, ctx),
                color: self.optional_color(styles.color.as_deref(), self.config.text_color),
                size: styles.font_size.unwrap_or(self.config.font_size) * scale,
            },
        };

        VisualNode {
            element_id: element.id.clone(),
            bounds: Rect::from(to_pixels(&element.geometry, width, height)),
            rotation: element.display_rotation(),
            opacity: styles.effective_opacity(),
            content,
        }
    }

    fn optional_color(&self, value: Option<&str>, fallback: Color) -> Color {
        match value {
            Some(value) => self.color_or(value, fallback),
            None => fallback,
        }
    }

    fn color_or(&self, value: &str, fallback: Color) -> Color {
        parse_color(value).unwrap_or_else(|| {
            tracing::debug!("Unparseable color {:?}, using {}", value, fallback);
            fallback
        })
    }
}

/// Render one side with the default configuration
pub fn render(side: &CardSide, ctx: &DataContext, width: f64, height: f64) -> SideRender {
    StaticRenderer::default().render(side, ctx, width, height)
}

/// Render both faces of a template with the default configuration
pub fn render_template(
    template: &CardTemplate,
    ctx: &DataContext,
    width: f64,
    height: f64,
) -> TemplateRender {
    StaticRenderer::default().render_template(template, ctx, width, height)
}
