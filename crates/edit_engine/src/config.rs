//! Editing surface configuration

use card_model::{ElementStyles, FontWeight, TextAlign};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for an [`EditingSurface`](crate::EditingSurface)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Canvas width in pixels
    pub canvas_width: f64,
    /// Canvas height in pixels
    pub canvas_height: f64,
    /// Width of new elements, percent of the card
    pub default_width: f64,
    /// Height of new elements, percent of the card
    pub default_height: f64,
    /// Smallest footprint a committed element may have, in pixels
    pub min_footprint_px: f64,
    /// Offset applied to duplicated objects, in pixels
    pub duplicate_offset_px: f64,
    /// Text given to new text elements
    pub default_text: String,
    pub default_text_styles: ElementStyles,
    pub default_shape_styles: ElementStyles,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400.0,
            canvas_height: 600.0,
            default_width: 40.0,
            default_height: 10.0,
            min_footprint_px: 4.0,
            duplicate_offset_px: 12.0,
            default_text: "Your text".to_string(),
            default_text_styles: ElementStyles::new()
                .with_color("#1f2933")
                .with_font_size(18.0)
                .with_font_weight(FontWeight::Normal)
                .with_text_align(TextAlign::Left),
            default_shape_styles: ElementStyles::new()
                .with_background_color("#d9e2ec")
                .with_border_radius(0.0),
        }
    }
}

impl EditorConfig {
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Load settings from a JSON file, or return defaults if it doesn't exist
    /// or cannot be parsed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse editor config, using defaults: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read editor config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height), (400.0, 600.0));
        assert_eq!(config.default_text_styles.font_size, Some(18.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"canvasWidth": 800}"#).unwrap();
        assert_eq!(config.canvas_width, 800.0);
        assert_eq!(config.canvas_height, 600.0);
        assert_eq!(config.default_text, "Your text");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        assert_eq!(
            EditorConfig::load_or_default("/nonexistent/editor.json"),
            EditorConfig::default()
        );
    }
}
