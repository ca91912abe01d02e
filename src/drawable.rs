//! Drawable model: the primitives and groups that live on the annotation canvas.
//!
//! A `Drawable` is either a primitive (`Shape::Path`, `Shape::Text`) or a
//! composite (`Shape::Group`). The canvas only ever holds primitives; groups
//! exist as logical units in the history and are flattened on the way in and
//! out. The serde layout is the persisted drawing format, so field names here
//! are part of the stored annotation documents.

#[cfg(test)]
#[path = "drawable_test.rs"]
mod drawable_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::GLYPH_WIDTH_RATIO;

/// Unique identifier for a drawable.
pub type DrawableId = Uuid;

/// A point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Whether `pt` lies inside the box grown by `slop` on every side.
    #[must_use]
    pub fn contains(&self, pt: Point, slop: f64) -> bool {
        pt.x >= self.min_x - slop && pt.x <= self.max_x + slop && pt.y >= self.min_y - slop && pt.y <= self.max_y + slop
    }

    fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Geometry and style of a drawable, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Freehand stroke.
    Path {
        points: Vec<Point>,
        stroke: String,
        stroke_width: f64,
        /// Canvas width the stroke was drawn at. Stroke geometry is
        /// resolution-dependent, so this is what lets a drawing be rescaled
        /// onto a differently sized preview.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        canvas_width: Option<f64>,
    },
    /// Editable text anchored at its top-left corner.
    Text {
        text: String,
        left: f64,
        top: f64,
        font_family: String,
        fill: String,
        font_size: f64,
    },
    /// Composite of other drawables, treated as one logical unit.
    Group { objects: Vec<Drawable> },
}

/// An object on the annotation canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub id: DrawableId,
    #[serde(flatten)]
    pub shape: Shape,
    /// Scaling is locked once an object has been committed to the history.
    #[serde(default)]
    pub lock_scaling: bool,
    /// Whether selection shows transform controls.
    #[serde(default = "default_has_controls")]
    pub has_controls: bool,
}

fn default_has_controls() -> bool {
    true
}

impl Drawable {
    /// Wrap a shape with a fresh id.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { id: Uuid::new_v4(), shape, lock_scaling: false, has_controls: true }
    }

    /// A freehand path with the given stroke style.
    #[must_use]
    pub fn path(points: Vec<Point>, stroke: impl Into<String>, stroke_width: f64) -> Self {
        Self::new(Shape::Path { points, stroke: stroke.into(), stroke_width, canvas_width: None })
    }

    /// A text object anchored at `at`.
    #[must_use]
    pub fn text(
        text: impl Into<String>,
        at: Point,
        font_family: impl Into<String>,
        fill: impl Into<String>,
        font_size: f64,
    ) -> Self {
        Self::new(Shape::Text {
            text: text.into(),
            left: at.x,
            top: at.y,
            font_family: font_family.into(),
            fill: fill.into(),
            font_size,
        })
    }

    /// A group of drawables.
    #[must_use]
    pub fn group(objects: Vec<Drawable>) -> Self {
        Self::new(Shape::Group { objects })
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.shape, Shape::Group { .. })
    }

    /// All primitives in this drawable, depth-first, in child order.
    ///
    /// A primitive flattens to itself; an empty group flattens to nothing.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Drawable> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Drawable>) {
        match &self.shape {
            Shape::Group { objects } => {
                for child in objects {
                    child.flatten_into(out);
                }
            }
            Shape::Path { .. } | Shape::Text { .. } => out.push(self),
        }
    }

    /// Swap each primitive for the copy in `live` with the same id, keeping
    /// the group structure. Primitives missing from `live` are left as-is.
    pub fn refresh_parts(&mut self, live: &[Drawable]) {
        if let Shape::Group { objects } = &mut self.shape {
            for child in objects.iter_mut() {
                child.refresh_parts(live);
            }
            return;
        }
        if let Some(current) = live.iter().find(|p| p.id == self.id) {
            self.clone_from(current);
        }
    }

    /// Lock scaling on this drawable and every child.
    pub fn lock(&mut self) {
        self.lock_scaling = true;
        if let Shape::Group { objects } = &mut self.shape {
            for child in objects.iter_mut() {
                child.lock();
            }
        }
    }

    /// Text content, if this is a text object.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Bounding box, or `None` for empty paths and groups.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        match &self.shape {
            Shape::Path { points, stroke_width, .. } => {
                let first = points.first()?;
                let half = stroke_width / 2.0;
                let seed = Bounds { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
                let b = points.iter().fold(seed, |acc, p| {
                    acc.union(Bounds { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y })
                });
                Some(Bounds { min_x: b.min_x - half, min_y: b.min_y - half, max_x: b.max_x + half, max_y: b.max_y + half })
            }
            Shape::Text { text, left, top, font_size, .. } => {
                #[allow(clippy::cast_precision_loss)]
                let width = text.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO;
                Some(Bounds { min_x: *left, min_y: *top, max_x: left + width, max_y: top + font_size })
            }
            Shape::Group { objects } => objects.iter().filter_map(Drawable::bounds).reduce(Bounds::union),
        }
    }

    /// Rescale every path tagged with another canvas width onto `width`,
    /// descending into groups. Untagged objects are left as-is.
    pub fn fit_to_width(&mut self, width: f64) {
        match self.shape {
            Shape::Group { ref mut objects } => {
                for child in objects.iter_mut() {
                    child.fit_to_width(width);
                }
            }
            Shape::Path { canvas_width: Some(drawn_at), .. } => {
                if drawn_at > 0.0 && width > 0.0 && (drawn_at - width).abs() > f64::EPSILON {
                    self.scale(width / drawn_at);
                }
            }
            Shape::Path { .. } | Shape::Text { .. } => {}
        }
    }

    /// Scale geometry and stroke/font sizes by `factor` around the origin.
    pub fn scale(&mut self, factor: f64) {
        match &mut self.shape {
            Shape::Path { points, stroke_width, canvas_width, .. } => {
                for p in points.iter_mut() {
                    p.x *= factor;
                    p.y *= factor;
                }
                *stroke_width *= factor;
                if let Some(w) = canvas_width.as_mut() {
                    *w *= factor;
                }
            }
            Shape::Text { left, top, font_size, .. } => {
                *left *= factor;
                *top *= factor;
                *font_size *= factor;
            }
            Shape::Group { objects } => {
                for child in objects.iter_mut() {
                    child.scale(factor);
                }
            }
        }
    }
}
