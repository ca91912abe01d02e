//! Shared constants for the annotation surface.

// ── Brush ───────────────────────────────────────────────────────

/// Default freehand brush width in canvas pixels.
pub const DEFAULT_BRUSH_WIDTH: f64 = 4.0;

/// Default brush and text color.
pub const DEFAULT_COLOR: &str = "#ff3860";

/// Brush width for the `big` pencil.
pub const PENCIL_BIG_WIDTH: f64 = 4.0;

/// Brush width for the `medium` pencil.
pub const PENCIL_MEDIUM_WIDTH: f64 = 2.0;

/// Brush width for the `small` pencil.
pub const PENCIL_SMALL_WIDTH: f64 = 1.0;

// ── Text ────────────────────────────────────────────────────────

/// Canvas height at which text is rendered at `BASE_FONT_SIZE`.
pub const BASE_TEXT_HEIGHT: f64 = 320.0;

/// Font size used on canvases no taller than `BASE_TEXT_HEIGHT`.
pub const BASE_FONT_SIZE: f64 = 12.0;

/// Font family for new text objects.
pub const DEFAULT_FONT_FAMILY: &str = "arial";

/// Placeholder content of a freshly added text object.
pub const TEXT_PLACEHOLDER: &str = "Type...";

/// Approximate glyph advance as a fraction of the font size, for text bounds.
pub const GLYPH_WIDTH_RATIO: f64 = 0.6;

// ── Canvas ──────────────────────────────────────────────────────

/// Canvas dimensions applied by `setup` before the host sizes it to the preview.
pub const INITIAL_CANVAS_SIZE: f64 = 100.0;

/// Pointer hit slop in canvas pixels.
pub const HIT_SLOP_PX: f64 = 4.0;
