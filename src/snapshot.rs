//! Timestamped annotation snapshots.
//!
//! A snapshot binds a serialized `Drawing` to a media timestamp along with the
//! canvas size it was drawn at. `SnapshotList` keeps at most the snapshots the
//! user actually drew on, ordered by time ascending. Ordering uses
//! `f64::total_cmp` with a stable sort, so snapshots sharing a time keep the
//! order they were inserted in.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};

use crate::drawable::Drawable;

/// Media time in seconds.
pub type Timestamp = f64;

/// Serialized object graph of one canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    pub objects: Vec<Drawable>,
}

impl Drawing {
    #[must_use]
    pub fn new(objects: Vec<Drawable>) -> Self {
        Self { objects }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Parse a drawing document.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `json` is not a valid drawing document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render the drawing as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Copy of this drawing with every tagged path rescaled from the canvas
    /// width it was drawn at to `width`, including paths inside groups.
    #[must_use]
    pub fn scaled_to(&self, width: f64) -> Self {
        let objects = self
            .objects
            .iter()
            .cloned()
            .map(|mut object| {
                object.fit_to_width(width);
                object
            })
            .collect();
        Self { objects }
    }
}

/// The persisted unit: a drawing at a point in the media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub time: Timestamp,
    pub width: f64,
    pub height: f64,
    pub drawing: Drawing,
}

/// External preview/media record the annotations are loaded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
}

/// What a capture did to the snapshot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A new snapshot was inserted.
    Created,
    /// The existing snapshot was overwritten.
    Updated,
    /// The existing snapshot was dropped because the drawing is empty.
    Removed,
    /// Nothing was drawn and there was nothing to remove.
    Skipped,
}

/// Snapshots ordered by time ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotList {
    items: Vec<Annotation>,
}

impl SnapshotList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a copy of `source`, sorted by time.
    /// `None` yields an empty list.
    pub fn reload(&mut self, source: Option<&[Annotation]>) -> &[Annotation] {
        self.items = source.map(<[Annotation]>::to_vec).unwrap_or_default();
        sort_by_time(&mut self.items);
        &self.items
    }

    /// Index of the first snapshot at exactly `time`.
    #[must_use]
    pub fn find(&self, time: Timestamp) -> Option<usize> {
        self.items.iter().position(|a| a.time.total_cmp(&time).is_eq())
    }

    /// The first snapshot at exactly `time`.
    #[must_use]
    pub fn get(&self, time: Timestamp) -> Option<&Annotation> {
        self.find(time).map(|idx| &self.items[idx])
    }

    /// Store a freshly captured snapshot.
    ///
    /// With `existing` pointing at a valid index, that entry is overwritten,
    /// or removed when the new drawing is empty. Without one, a non-empty
    /// snapshot is appended and the list re-sorted.
    pub fn capture(&mut self, snapshot: Annotation, existing: Option<usize>) -> CaptureOutcome {
        match existing.filter(|idx| *idx < self.items.len()) {
            Some(idx) if snapshot.drawing.is_empty() => {
                self.items.remove(idx);
                CaptureOutcome::Removed
            }
            Some(idx) => {
                self.items[idx] = snapshot;
                sort_by_time(&mut self.items);
                CaptureOutcome::Updated
            }
            None if snapshot.drawing.is_empty() => CaptureOutcome::Skipped,
            None => {
                self.items.push(snapshot);
                sort_by_time(&mut self.items);
                CaptureOutcome::Created
            }
        }
    }

    /// Detached copy for handing to the persistence layer.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Annotation> {
        self.items.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot times in list order.
    #[must_use]
    pub fn times(&self) -> Vec<Timestamp> {
        self.items.iter().map(|a| a.time).collect()
    }
}

fn sort_by_time(items: &mut [Annotation]) {
    // `sort_by` is stable; equal times keep their relative order.
    items.sort_by(|a, b| a.time.total_cmp(&b.time));
}
