//! Surface configuration with environment overrides.

use crate::consts::{
    BASE_FONT_SIZE, BASE_TEXT_HEIGHT, DEFAULT_BRUSH_WIDTH, DEFAULT_COLOR, DEFAULT_FONT_FAMILY, INITIAL_CANVAS_SIZE,
    TEXT_PLACEHOLDER,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub brush_color: String,
    pub brush_width: f64,
    pub text_color: String,
    pub font_family: String,
    pub base_font_size: f64,
    pub base_text_height: f64,
    pub text_placeholder: String,
    pub initial_width: f64,
    pub initial_height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            brush_color: DEFAULT_COLOR.to_string(),
            brush_width: DEFAULT_BRUSH_WIDTH,
            text_color: DEFAULT_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            base_font_size: BASE_FONT_SIZE,
            base_text_height: BASE_TEXT_HEIGHT,
            text_placeholder: TEXT_PLACEHOLDER.to_string(),
            initial_width: INITIAL_CANVAS_SIZE,
            initial_height: INITIAL_CANVAS_SIZE,
        }
    }
}

impl SurfaceConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `ANNOTATION_BRUSH_WIDTH`: positive number, default 4
    /// - `ANNOTATION_BRUSH_COLOR`: CSS color, default `#ff3860`
    /// - `ANNOTATION_TEXT_COLOR`: CSS color, default `#ff3860`
    /// - `ANNOTATION_FONT_FAMILY`: default `arial`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            brush_color: env_string("ANNOTATION_BRUSH_COLOR", &defaults.brush_color),
            brush_width: env_parse_positive_f64("ANNOTATION_BRUSH_WIDTH", defaults.brush_width),
            text_color: env_string("ANNOTATION_TEXT_COLOR", &defaults.text_color),
            font_family: env_string("ANNOTATION_FONT_FAMILY", &defaults.font_family),
            ..defaults
        }
    }

    /// Font size for new text on a canvas of the given height.
    ///
    /// Canvases taller than the base height scale the font proportionally so
    /// text keeps the same apparent size over the preview.
    #[must_use]
    pub fn font_size_for(&self, canvas_height: f64) -> f64 {
        if canvas_height > self.base_text_height {
            self.base_font_size * (canvas_height / self.base_text_height)
        } else {
            self.base_font_size
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn env_parse_positive_f64(key: &str, default: f64) -> f64 {
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
