#![allow(clippy::float_cmp)]

use super::*;
use crate::drawable::Point;

fn dot(x: f64, y: f64) -> Drawable {
    Drawable::path(vec![Point::new(x, y)], "#000", 1.0)
}

#[test]
fn new_canvas_is_empty_with_size() {
    let c = SceneCanvas::new(640.0, 360.0);
    assert!(c.is_empty());
    assert_eq!(c.width(), 640.0);
    assert_eq!(c.height(), 360.0);
    assert!(c.active().is_none());
    assert_eq!(c.brush(), &Brush::default());
}

#[test]
fn add_appends_in_draw_order() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    let a = dot(0.0, 0.0);
    let b = dot(1.0, 1.0);
    c.add(a.clone());
    c.add(b.clone());
    let ids: Vec<_> = c.objects().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[test]
fn add_same_id_replaces_in_place() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    let mut a = dot(0.0, 0.0);
    c.add(a.clone());
    c.add(dot(5.0, 5.0));
    a.lock_scaling = true;
    c.add(a.clone());
    assert_eq!(c.len(), 2);
    assert_eq!(c.objects()[0], a);
}

#[test]
fn remove_returns_object_and_clears_active() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    let a = dot(0.0, 0.0);
    c.add(a.clone());
    c.set_active(Some(a.id));
    assert_eq!(c.active(), Some(a.id));

    let removed = c.remove(&a.id).unwrap();
    assert_eq!(removed.id, a.id);
    assert!(c.active().is_none());
    assert!(c.remove(&a.id).is_none());
}

#[test]
fn set_active_ignores_unknown_ids() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    c.set_active(Some(dot(0.0, 0.0).id));
    assert!(c.active().is_none());
}

#[test]
fn get_and_get_mut_by_id() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    let a = dot(0.0, 0.0);
    c.add(a.clone());
    assert!(c.get(&a.id).is_some());
    c.get_mut(&a.id).unwrap().has_controls = false;
    assert!(!c.get(&a.id).unwrap().has_controls);
}

#[test]
fn clear_removes_everything() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    let a = dot(0.0, 0.0);
    c.add(a.clone());
    c.set_active(Some(a.id));
    c.clear();
    assert!(c.is_empty());
    assert!(c.active().is_none());
}

#[test]
fn replace_subscriptions_is_idempotent() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    let events = [CanvasEvent::ObjectAdded, CanvasEvent::PointerUp];
    c.replace_subscriptions(&events);
    c.replace_subscriptions(&events);
    assert_eq!(c.subscriptions(), &events);
}

#[test]
fn replace_subscriptions_drops_previous_and_dedupes() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    c.replace_subscriptions(&[CanvasEvent::ObjectMoved]);
    c.replace_subscriptions(&[CanvasEvent::PointerDown, CanvasEvent::PointerDown]);
    assert_eq!(c.subscriptions(), &[CanvasEvent::PointerDown]);
    assert!(!c.is_subscribed(CanvasEvent::ObjectMoved));
    assert!(c.is_subscribed(CanvasEvent::PointerDown));
}

#[test]
fn brush_is_mutable() {
    let mut c = SceneCanvas::new(10.0, 10.0);
    c.brush_mut().width = 2.0;
    c.brush_mut().color = "#123456".into();
    assert_eq!(c.brush(), &Brush { color: "#123456".into(), width: 2.0 });
}
