//! Annotation surface controller.
//!
//! DESIGN
//! ======
//! `AnnotationSurface` owns the canvas, the undo/redo history, the snapshot
//! list and the interaction state. Every mutation goes through one gateway
//! (`add_object` / `delete_object`) or one replay step (`undo` / `redo`),
//! which flatten groups into primitives on the canvas while recording the
//! group as a single history entry. History is always updated before a
//! save is requested, so a persisted snapshot never runs ahead of it.
//!
//! Handlers return `Action`s for the host: the host persists on
//! `SaveRequested` (via `save`), repaints on `RenderNeeded`, and focuses its
//! text input on `EditText`.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use tracing::{debug, info, warn};

use crate::canvas::{Canvas, CanvasEvent, SceneCanvas};
use crate::config::SurfaceConfig;
use crate::consts::HIT_SLOP_PX;
use crate::drawable::{Drawable, DrawableId, Point, Shape};
use crate::error::SurfaceError;
use crate::history::{ActionKind, History};
use crate::hit::hit_test;
use crate::input::{InputState, PencilSize, TextEdit, Tool, UiState};
use crate::snapshot::{Annotation, CaptureOutcome, Drawing, Preview, SnapshotList, Timestamp};

/// Canvas events the surface handles. `setup` installs exactly this set.
pub const SUBSCRIBED_EVENTS: [CanvasEvent; 5] = [
    CanvasEvent::ObjectMoved,
    CanvasEvent::ObjectAdded,
    CanvasEvent::PointerUp,
    CanvasEvent::PointerMove,
    CanvasEvent::PointerDown,
];

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The drawing changed; persist it with `save`.
    SaveRequested,
    RenderNeeded,
    /// Focus the host text editor on this text object.
    EditText { id: DrawableId },
}

pub struct AnnotationSurface<C: Canvas = SceneCanvas> {
    canvas: Option<C>,
    history: History,
    snapshots: SnapshotList,
    ui: UiState,
    input: InputState,
    config: SurfaceConfig,
}

impl<C: Canvas> Default for AnnotationSurface<C> {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

impl<C: Canvas> AnnotationSurface<C> {
    /// Create a surface with no canvas attached.
    #[must_use]
    pub fn new(config: SurfaceConfig) -> Self {
        let ui = UiState {
            brush_color: config.brush_color.clone(),
            brush_width: config.brush_width,
            text_color: config.text_color.clone(),
            ..UiState::default()
        };
        Self {
            canvas: None,
            history: History::new(),
            snapshots: SnapshotList::new(),
            ui,
            input: InputState::Idle,
            config,
        }
    }

    // --- Lifecycle ---

    /// Attach `canvas` and (re)initialize the surface.
    ///
    /// Applies the initial dimensions and the current brush choice, replaces the canvas event
    /// subscriptions wholesale, and resets history and gesture state. Safe
    /// to call repeatedly.
    pub fn setup(&mut self, mut canvas: C) -> &mut C {
        canvas.set_dimensions(self.config.initial_width, self.config.initial_height);
        let brush = canvas.brush_mut();
        brush.color.clone_from(&self.ui.brush_color);
        brush.width = self.ui.brush_width;
        canvas.replace_subscriptions(&SUBSCRIBED_EVENTS);

        self.reset_interaction();
        info!(width = canvas.width(), height = canvas.height(), "annotation surface set up");
        self.canvas.insert(canvas)
    }

    /// Re-install the event subscriptions on the attached canvas.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn resubscribe(&mut self) -> Result<(), SurfaceError> {
        let canvas = require(&mut self.canvas, "resubscribe")?;
        canvas.replace_subscriptions(&SUBSCRIBED_EVENTS);
        Ok(())
    }

    /// Resize the canvas to match the preview.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "set_dimensions")?;
        canvas.set_dimensions(width, height);
        Ok(vec![Action::RenderNeeded])
    }

    fn reset_interaction(&mut self) {
        self.history.reset();
        self.input = InputState::Idle;
        self.ui.text_edit = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.canvas.as_mut()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn snapshots(&self) -> &SnapshotList {
        &self.snapshots
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    /// Whether anything is drawn on the canvas.
    #[must_use]
    pub fn has_drawing(&self) -> bool {
        self.canvas.as_ref().is_some_and(|c| !c.is_empty())
    }

    // --- Mutation gateway ---

    /// Put `object` on the canvas as one undoable unit.
    ///
    /// Groups are flattened: each primitive lands on the canvas, the group
    /// is recorded once.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn add_object(&mut self, object: Drawable) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "add_object")?;
        apply(canvas, ActionKind::Add, &object);
        debug!(id = %object.id, parts = object.flatten().len(), "object added");
        self.history.record_add(object);
        self.history.clear_redo();
        Ok(vec![Action::RenderNeeded, Action::SaveRequested])
    }

    /// Take `object` off the canvas as one undoable unit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn delete_object(&mut self, mut object: Drawable) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "delete_object")?;
        let removed = apply(canvas, ActionKind::Remove, &object);
        object.refresh_parts(&removed);
        debug!(id = %object.id, parts = object.flatten().len(), "object deleted");
        self.history.record_remove(object);
        self.history.clear_redo();
        self.drop_stale_edit();
        Ok(vec![Action::RenderNeeded, Action::SaveRequested])
    }

    /// Delete the canvas's active object. No-op without a selection.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn delete_selection(&mut self) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "delete_selection")?;
        let Some(object) = canvas.active().and_then(|id| canvas.get(&id).cloned()) else {
            return Ok(Vec::new());
        };
        self.delete_object(object)
    }

    // --- Undo / redo ---

    /// Revert the most recent unit. No-op when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if history is non-empty but no canvas is attached.
    pub fn undo(&mut self) -> Result<Vec<Action>, SurfaceError> {
        if !self.history.can_undo() {
            return Ok(Vec::new());
        }
        let canvas = require(&mut self.canvas, "undo")?;
        let Some(record) = self.history.undo() else {
            return Ok(Vec::new());
        };
        let removed = apply(canvas, record.kind.inverse(), &record.object);
        record.object.refresh_parts(&removed);
        let (kind, id) = (record.kind, record.object.id);
        debug!(
            ?kind,
            %id,
            done = self.history.done().len(),
            undone = self.history.undone().len(),
            "undo"
        );
        self.drop_stale_edit();
        Ok(vec![Action::RenderNeeded, Action::SaveRequested])
    }

    /// Replay the most recently undone unit. No-op when there is nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if redo history is non-empty but no canvas is attached.
    pub fn redo(&mut self) -> Result<Vec<Action>, SurfaceError> {
        if !self.history.can_redo() {
            return Ok(Vec::new());
        }
        let canvas = require(&mut self.canvas, "redo")?;
        let Some(record) = self.history.redo() else {
            return Ok(Vec::new());
        };
        let removed = apply(canvas, record.kind, &record.object);
        record.object.refresh_parts(&removed);
        let (kind, id) = (record.kind, record.object.id);
        debug!(
            ?kind,
            %id,
            done = self.history.done().len(),
            undone = self.history.undone().len(),
            "redo"
        );
        self.drop_stale_edit();
        Ok(vec![Action::RenderNeeded, Action::SaveRequested])
    }

    /// Drop all redo entries.
    pub fn clear_redo_history(&mut self) {
        self.history.clear_redo();
    }

    // --- Canvas events ---

    /// The canvas library inserted `object` itself (e.g. a brush path).
    ///
    /// The object is locked against scaling and recorded as an `Add`; while a
    /// stroke is in progress it joins the stroke's unit instead.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn on_object_added(&mut self, mut object: Drawable) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "on_object_added")?;
        if !canvas.is_subscribed(CanvasEvent::ObjectAdded) {
            return Ok(Vec::new());
        }
        object.lock();
        apply(canvas, ActionKind::Add, &object);
        match &mut self.input {
            InputState::Drawing { adopted, .. } => adopted.push(object),
            InputState::Idle => self.history.record_add(object),
        }
        Ok(vec![Action::RenderNeeded])
    }

    /// The user finished moving an object.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn on_object_moved(&mut self, id: &DrawableId) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "on_object_moved")?;
        if !canvas.is_subscribed(CanvasEvent::ObjectMoved) || canvas.get(id).is_none() {
            return Ok(Vec::new());
        }
        Ok(vec![Action::SaveRequested])
    }

    /// Pointer pressed on the canvas.
    ///
    /// Commits any open text edit first, then starts a stroke (pencil),
    /// places a text object (text), or selects the object under the
    /// pointer (select).
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn on_pointer_down(&mut self, pt: Point) -> Result<Vec<Action>, SurfaceError> {
        if !require(&mut self.canvas, "on_pointer_down")?.is_subscribed(CanvasEvent::PointerDown) {
            return Ok(Vec::new());
        }
        let mut actions = self.commit_text();
        match self.ui.tool {
            Tool::Pencil => {
                self.input = InputState::Drawing { points: vec![pt], adopted: Vec::new() };
                actions.push(Action::RenderNeeded);
            }
            Tool::Text => actions.extend(self.add_text(pt)?),
            Tool::Select => {
                let canvas = require(&mut self.canvas, "on_pointer_down")?;
                let hit = hit_test(pt, canvas.objects(), HIT_SLOP_PX);
                canvas.set_active(hit);
                actions.push(Action::RenderNeeded);
            }
        }
        Ok(actions)
    }

    /// Pointer moved over the canvas; extends the stroke in progress.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn on_pointer_move(&mut self, pt: Point) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "on_pointer_move")?;
        if !canvas.is_subscribed(CanvasEvent::PointerMove) {
            return Ok(Vec::new());
        }
        let InputState::Drawing { points, .. } = &mut self.input else {
            return Ok(Vec::new());
        };
        points.push(pt);
        Ok(vec![Action::RenderNeeded])
    }

    /// Pointer released. Ends a stroke in progress.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn on_pointer_up(&mut self, pt: Point) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "on_pointer_up")?;
        if !canvas.is_subscribed(CanvasEvent::PointerUp) {
            return Ok(Vec::new());
        }
        self.end_drawing(pt)
    }

    /// Commit the stroke in progress as one undoable unit: the path plus
    /// anything the canvas library inserted meanwhile. Clears redo history
    /// and requests a save. No-op when not drawing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn end_drawing(&mut self, pt: Point) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "end_drawing")?;
        let InputState::Drawing { mut points, adopted } = std::mem::take(&mut self.input) else {
            return Ok(Vec::new());
        };
        if points.last() != Some(&pt) {
            points.push(pt);
        }

        let brush = canvas.brush();
        let mut stroke = Drawable::path(points, brush.color.clone(), brush.width);
        if let Shape::Path { canvas_width, .. } = &mut stroke.shape {
            *canvas_width = Some(canvas.width());
        }
        stroke.lock();
        canvas.add(stroke.clone());

        let unit = if adopted.is_empty() {
            stroke
        } else {
            let mut parts = Vec::with_capacity(adopted.len() + 1);
            parts.push(stroke);
            parts.extend(adopted);
            Drawable::group(parts)
        };
        debug!(id = %unit.id, parts = unit.flatten().len(), "stroke committed");
        self.history.record_add(unit);
        self.history.clear_redo();
        Ok(vec![Action::RenderNeeded, Action::SaveRequested])
    }

    // --- Text ---

    /// Place an editable text object at `at` and start editing it.
    ///
    /// The placeholder is fully selected. The text is recorded as one unit
    /// now; the save happens when the edit is committed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn add_text(&mut self, at: Point) -> Result<Vec<Action>, SurfaceError> {
        let mut actions = self.commit_text();
        let canvas = require(&mut self.canvas, "add_text")?;
        let font_size = self.config.font_size_for(canvas.height());
        let mut text = Drawable::text(
            self.config.text_placeholder.clone(),
            at,
            self.config.font_family.clone(),
            self.ui.text_color.clone(),
            font_size,
        );
        text.lock();
        let id = text.id;
        canvas.add(text.clone());
        canvas.set_active(Some(id));

        let len = self.config.text_placeholder.chars().count();
        self.ui.text_edit = Some(TextEdit { id, selection: (0, len) });
        self.history.record_add(text);
        self.history.clear_redo();
        debug!(%id, font_size, "text added");

        actions.push(Action::EditText { id });
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Replace the content of the text being edited. Does not request a save.
    pub fn edit_text(&mut self, content: &str) -> Vec<Action> {
        let Some(edit) = self.ui.text_edit.as_mut() else {
            return Vec::new();
        };
        let Some(canvas) = self.canvas.as_mut() else {
            return Vec::new();
        };
        let Some(Shape::Text { text, .. }) = canvas.get_mut(&edit.id).map(|o| &mut o.shape) else {
            return Vec::new();
        };
        content.clone_into(text);
        let end = content.chars().count();
        edit.selection = (end, end);
        vec![Action::RenderNeeded]
    }

    /// Leave text editing (the editor lost focus) and request a save.
    pub fn commit_text(&mut self) -> Vec<Action> {
        let Some(edit) = self.ui.text_edit.take() else {
            return Vec::new();
        };
        if let Some(object) = self.canvas.as_ref().and_then(|c| c.get(&edit.id)) {
            self.history.refresh(object);
        }
        debug!(id = %edit.id, "text committed");
        vec![Action::SaveRequested]
    }

    fn drop_stale_edit(&mut self) {
        let Some(edit) = self.ui.text_edit.as_ref() else {
            return;
        };
        if !self.canvas.as_ref().is_some_and(|c| c.get(&edit.id).is_some()) {
            self.ui.text_edit = None;
        }
    }

    // --- Tools and palettes ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Toggle the pencil palette.
    pub fn pick_pencil(&mut self) {
        self.ui.palettes.pencil_open = !self.ui.palettes.pencil_open;
    }

    /// Toggle the color palette.
    pub fn pick_color(&mut self) {
        self.ui.palettes.color_open = !self.ui.palettes.color_open;
    }

    /// Set the brush color and close the color palette.
    pub fn change_color(&mut self, color: &str) {
        color.clone_into(&mut self.ui.brush_color);
        if let Some(canvas) = self.canvas.as_mut() {
            color.clone_into(&mut canvas.brush_mut().color);
        }
        self.ui.palettes.color_open = false;
    }

    /// Set the color for new text and close the color palette.
    pub fn change_text_color(&mut self, color: &str) {
        color.clone_into(&mut self.ui.text_color);
        self.ui.palettes.color_open = false;
    }

    /// Set the brush width from a pencil preset and close the pencil palette.
    pub fn change_pencil(&mut self, pencil: PencilSize) {
        self.ui.pencil = pencil;
        self.ui.brush_width = pencil.width();
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.brush_mut().width = pencil.width();
        }
        self.ui.palettes.pencil_open = false;
    }

    // --- Snapshots ---

    /// Serialize the canvas into the snapshot for `current_time`.
    ///
    /// Paths are tagged with the current canvas width (once) and lose their
    /// transform controls. An empty canvas removes the snapshot at that time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn capture_snapshot(&mut self, current_time: Timestamp) -> Result<CaptureOutcome, SurfaceError> {
        let canvas = require(&mut self.canvas, "capture_snapshot")?;
        let width = canvas.width();
        for object in canvas.objects_mut() {
            if let Shape::Path { canvas_width, .. } = &mut object.shape {
                if canvas_width.is_none() {
                    *canvas_width = Some(width);
                }
                object.has_controls = false;
            }
        }

        let snapshot = Annotation {
            time: current_time,
            width,
            height: canvas.height(),
            drawing: Drawing::new(canvas.objects().to_vec()),
        };
        let objects = snapshot.drawing.len();
        let existing = self.snapshots.find(current_time);
        let outcome = self.snapshots.capture(snapshot, existing);
        debug!(time = current_time, objects, ?outcome, snapshots = self.snapshots.len(), "snapshot captured");
        Ok(outcome)
    }

    /// Capture at `current_time` and return a detached copy of every
    /// snapshot, ready to persist.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn save(&mut self, current_time: Timestamp) -> Result<Vec<Annotation>, SurfaceError> {
        self.capture_snapshot(current_time)?;
        Ok(self.snapshots.to_vec())
    }

    /// Replace the snapshot list with the preview's annotations, sorted by time.
    pub fn reload(&mut self, preview: &Preview) -> &[Annotation] {
        let loaded = self.snapshots.reload(preview.annotations.as_deref());
        info!(count = loaded.len(), "annotations reloaded");
        loaded
    }

    /// Show the snapshot at `time` on the canvas, rescaled to the current
    /// width. The canvas is cleared when there is none. History restarts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no canvas is attached.
    pub fn load_annotation(&mut self, time: Timestamp) -> Result<Vec<Action>, SurfaceError> {
        let canvas = require(&mut self.canvas, "load_annotation")?;
        canvas.clear();
        if let Some(annotation) = self.snapshots.get(time) {
            for object in &annotation.drawing.scaled_to(canvas.width()).objects {
                apply(canvas, ActionKind::Add, object);
            }
        }
        self.reset_interaction();
        Ok(vec![Action::RenderNeeded])
    }

    /// Remove everything from the canvas and restart history. No-op without a canvas.
    pub fn clear_canvas(&mut self) -> Vec<Action> {
        let Some(canvas) = self.canvas.as_mut() else {
            return Vec::new();
        };
        canvas.clear();
        self.reset_interaction();
        vec![Action::RenderNeeded]
    }
}

fn require<'a, C>(canvas: &'a mut Option<C>, op: &'static str) -> Result<&'a mut C, SurfaceError> {
    canvas.as_mut().ok_or_else(|| {
        warn!(op, "annotation canvas not initialized");
        SurfaceError::InvalidState(op)
    })
}

/// Add or remove every primitive of `object`. Returns the live copies that
/// came off the canvas, which may have changed since `object` was taken.
fn apply<C: Canvas>(canvas: &mut C, kind: ActionKind, object: &Drawable) -> Vec<Drawable> {
    let mut removed = Vec::new();
    for part in object.flatten() {
        match kind {
            ActionKind::Add => canvas.add(part.clone()),
            ActionKind::Remove => removed.extend(canvas.remove(&part.id)),
        }
    }
    removed
}
