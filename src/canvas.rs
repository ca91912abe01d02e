//! Drawing canvas boundary.
//!
//! `Canvas` is the surface controller's view of the 2D drawing library: an
//! ordered list of primitives, the viewport size, the freehand brush, the
//! active (selected) object, and the set of library events the controller
//! listens to. `SceneCanvas` is the in-memory implementation used by hosts
//! that render the scene themselves, and by the tests.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use crate::consts::{DEFAULT_BRUSH_WIDTH, DEFAULT_COLOR};
use crate::drawable::{Drawable, DrawableId};

/// Library events the surface controller can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasEvent {
    /// The library inserted an object on its own (e.g. a brush path).
    ObjectAdded,
    /// The user finished dragging an object.
    ObjectMoved,
    PointerDown,
    PointerMove,
    PointerUp,
}

/// Freehand brush settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub color: String,
    pub width: f64,
}

impl Default for Brush {
    fn default() -> Self {
        Self { color: DEFAULT_COLOR.to_string(), width: DEFAULT_BRUSH_WIDTH }
    }
}

/// Primitive operations the surface needs from a drawing canvas.
pub trait Canvas {
    /// Insert a primitive on top. An object with the same id is replaced in place.
    fn add(&mut self, object: Drawable);

    /// Remove a primitive by id, returning it if it was present.
    fn remove(&mut self, id: &DrawableId) -> Option<Drawable>;

    /// Primitives in draw order (bottom first).
    fn objects(&self) -> &[Drawable];

    /// Mutable access to the primitives, for in-place tagging and edits.
    fn objects_mut(&mut self) -> &mut [Drawable];

    /// Remove every object and clear the selection.
    fn clear(&mut self);

    fn width(&self) -> f64;

    fn height(&self) -> f64;

    fn set_dimensions(&mut self, width: f64, height: f64);

    /// The selected object, if any.
    fn active(&self) -> Option<DrawableId>;

    fn set_active(&mut self, id: Option<DrawableId>);

    fn brush(&self) -> &Brush;

    fn brush_mut(&mut self) -> &mut Brush;

    /// Replace the full set of subscribed events. Calling this repeatedly
    /// with the same set leaves exactly one subscription per event.
    fn replace_subscriptions(&mut self, events: &[CanvasEvent]);

    fn is_subscribed(&self, event: CanvasEvent) -> bool;

    /// Look up a primitive by id.
    fn get(&self, id: &DrawableId) -> Option<&Drawable> {
        self.objects().iter().find(|o| o.id == *id)
    }

    /// Mutable lookup of a primitive by id.
    fn get_mut(&mut self, id: &DrawableId) -> Option<&mut Drawable> {
        self.objects_mut().iter_mut().find(|o| o.id == *id)
    }

    /// Number of primitives on the canvas.
    fn len(&self) -> usize {
        self.objects().len()
    }

    fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }
}

/// In-memory canvas: a z-ordered object list plus viewport and brush state.
#[derive(Debug, Clone, Default)]
pub struct SceneCanvas {
    objects: Vec<Drawable>,
    width: f64,
    height: f64,
    active: Option<DrawableId>,
    brush: Brush,
    subscriptions: Vec<CanvasEvent>,
}

impl SceneCanvas {
    /// Create an empty canvas of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Currently subscribed events, in subscription order.
    #[must_use]
    pub fn subscriptions(&self) -> &[CanvasEvent] {
        &self.subscriptions
    }
}

impl Canvas for SceneCanvas {
    fn add(&mut self, object: Drawable) {
        if let Some(existing) = self.objects.iter_mut().find(|o| o.id == object.id) {
            *existing = object;
        } else {
            self.objects.push(object);
        }
    }

    fn remove(&mut self, id: &DrawableId) -> Option<Drawable> {
        let idx = self.objects.iter().position(|o| o.id == *id)?;
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        Some(self.objects.remove(idx))
    }

    fn objects(&self) -> &[Drawable] {
        &self.objects
    }

    fn objects_mut(&mut self) -> &mut [Drawable] {
        &mut self.objects
    }

    fn clear(&mut self) {
        self.objects.clear();
        self.active = None;
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_dimensions(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn active(&self) -> Option<DrawableId> {
        self.active
    }

    fn set_active(&mut self, id: Option<DrawableId>) {
        self.active = id.filter(|id| self.objects.iter().any(|o| o.id == *id));
    }

    fn brush(&self) -> &Brush {
        &self.brush
    }

    fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    fn replace_subscriptions(&mut self, events: &[CanvasEvent]) {
        self.subscriptions.clear();
        for event in events {
            if !self.subscriptions.contains(event) {
                self.subscriptions.push(*event);
            }
        }
    }

    fn is_subscribed(&self, event: CanvasEvent) -> bool {
        self.subscriptions.contains(&event)
    }
}
