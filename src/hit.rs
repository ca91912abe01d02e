#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::drawable::{Drawable, DrawableId, Point};

/// Topmost object whose bounds (grown by `slop`) contain `pt`.
#[must_use]
pub fn hit_test(pt: Point, objects: &[Drawable], slop: f64) -> Option<DrawableId> {
    objects
        .iter()
        .rev()
        .find(|o| o.bounds().is_some_and(|b| b.contains(pt, slop)))
        .map(|o| o.id)
}
