//! Linear undo/redo history of add/remove mutations.
//!
//! The history only does bookkeeping: `undo` and `redo` hand back the record
//! that moved, in its new place, so the caller can apply it to the canvas and
//! keep the stored copy in step with what was on screen. Each record is one
//! logical unit (a whole stroke or group), never a single primitive of it.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::drawable::Drawable;

/// Kind of mutation a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Add,
    Remove,
}

impl ActionKind {
    /// The mutation that reverts this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Add => Self::Remove,
            Self::Remove => Self::Add,
        }
    }
}

/// One entry on a history stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub object: Drawable,
}

/// Done-stack and undone-stack.
#[derive(Debug, Clone, Default)]
pub struct History {
    done: Vec<ActionRecord>,
    undone: Vec<ActionRecord>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an `Add` record. Redo history is left alone; committing callers
    /// clear it explicitly.
    pub fn record_add(&mut self, object: Drawable) {
        self.done.push(ActionRecord { kind: ActionKind::Add, object });
    }

    /// Push a `Remove` record.
    pub fn record_remove(&mut self, object: Drawable) {
        self.done.push(ActionRecord { kind: ActionKind::Remove, object });
    }

    /// Move the most recent record to the undone-stack and return it.
    ///
    /// The caller applies `record.kind.inverse()` and may update the stored
    /// object in place with what it took off the canvas. Returns `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<&mut ActionRecord> {
        let record = self.done.pop()?;
        self.undone.push(record);
        self.undone.last_mut()
    }

    /// Move the most recently undone record back to the done-stack and
    /// return it. The caller replays `record.kind`.
    pub fn redo(&mut self) -> Option<&mut ActionRecord> {
        let record = self.undone.pop()?;
        self.done.push(record);
        self.done.last_mut()
    }

    /// Drop all redo entries.
    pub fn clear_redo(&mut self) {
        self.undone.clear();
    }

    /// Drop both stacks.
    pub fn reset(&mut self) {
        self.done.clear();
        self.undone.clear();
    }

    /// Replace the stored copy of `object` (matched by id) in both stacks,
    /// so later replays restore its latest content.
    pub fn refresh(&mut self, object: &Drawable) {
        for record in self.done.iter_mut().chain(self.undone.iter_mut()) {
            if record.object.id == object.id {
                record.object = object.clone();
            }
        }
    }

    #[must_use]
    pub fn done(&self) -> &[ActionRecord] {
        &self.done
    }

    #[must_use]
    pub fn undone(&self) -> &[ActionRecord] {
        &self.undone
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
