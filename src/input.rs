//! Input model: tools, pencil sizes, palette flags, and the gesture state machine.
//!
//! `InputState` tracks the freehand gesture between pointer-down and
//! pointer-up. Palette visibility and the in-place text edit live in
//! `UiState`; they are independent of the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{PENCIL_BIG_WIDTH, PENCIL_MEDIUM_WIDTH, PENCIL_SMALL_WIDTH};
use crate::drawable::{Drawable, DrawableId, Point};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Freehand drawing.
    Pencil,
    /// Click to place a text object.
    Text,
}

/// Pencil presets offered by the pencil palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PencilSize {
    #[default]
    Big,
    Medium,
    Small,
}

impl PencilSize {
    /// Brush width in canvas pixels.
    #[must_use]
    pub fn width(self) -> f64 {
        match self {
            Self::Big => PENCIL_BIG_WIDTH,
            Self::Medium => PENCIL_MEDIUM_WIDTH,
            Self::Small => PENCIL_SMALL_WIDTH,
        }
    }
}

/// Palette visibility flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palettes {
    pub color_open: bool,
    pub pencil_open: bool,
}

/// An in-place text edit in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The text object being edited.
    pub id: DrawableId,
    /// Selected character range (start inclusive, end exclusive).
    pub selection: (usize, usize),
}

/// Persistent UI state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    pub pencil: PencilSize,
    /// Brush applied to the canvas; survives re-running setup.
    pub brush_color: String,
    pub brush_width: f64,
    /// Color used for new text objects.
    pub text_color: String,
    pub palettes: Palettes,
    pub text_edit: Option<TextEdit>,
}

/// Freehand gesture state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A stroke is being drawn.
    Drawing {
        /// Pointer positions so far, in canvas pixels.
        points: Vec<Point>,
        /// Objects the canvas library inserted during the stroke; they are
        /// committed together with the stroke as one unit.
        adopted: Vec<Drawable>,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
