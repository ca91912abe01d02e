#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn stroke(points: &[(f64, f64)]) -> Drawable {
    Drawable::path(points.iter().map(|&(x, y)| Point::new(x, y)).collect(), "#000", 2.0)
}

fn label(text: &str) -> Drawable {
    Drawable::text(text, Point::new(10.0, 20.0), "arial", "#fff", 10.0)
}

// =============================================================
// Constructors
// =============================================================

#[test]
fn constructors_assign_unique_ids() {
    let a = stroke(&[(0.0, 0.0)]);
    let b = stroke(&[(0.0, 0.0)]);
    assert_ne!(a.id, b.id);
}

#[test]
fn new_drawable_is_unlocked_with_controls() {
    let d = label("hi");
    assert!(!d.lock_scaling);
    assert!(d.has_controls);
}

#[test]
fn kind_predicates() {
    assert!(Drawable::group(vec![]).is_group());
    assert!(!label("x").is_group());
}

#[test]
fn lock_is_recursive() {
    let mut g = Drawable::group(vec![label("a"), Drawable::group(vec![stroke(&[(0.0, 0.0)])])]);
    g.lock();
    assert!(g.lock_scaling);
    assert!(g.flatten().iter().all(|d| d.lock_scaling));
}

#[test]
fn text_content_only_for_text() {
    assert_eq!(label("note").text_content(), Some("note"));
    assert_eq!(stroke(&[(0.0, 0.0)]).text_content(), None);
}

// =============================================================
// Flatten
// =============================================================

#[test]
fn flatten_primitive_is_itself() {
    let d = label("a");
    let flat = d.flatten();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].id, d.id);
}

#[test]
fn flatten_nested_groups_depth_first() {
    let a = label("a");
    let b = stroke(&[(1.0, 1.0)]);
    let c = label("c");
    let inner = Drawable::group(vec![b.clone(), c.clone()]);
    let outer = Drawable::group(vec![a.clone(), inner, Drawable::group(vec![])]);

    let ids: Vec<DrawableId> = outer.flatten().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[test]
fn flatten_empty_group_is_empty() {
    assert!(Drawable::group(vec![]).flatten().is_empty());
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn path_bounds_include_half_stroke() {
    let d = stroke(&[(10.0, 10.0), (30.0, 20.0)]);
    let b = d.bounds().unwrap();
    assert_eq!(b, Bounds { min_x: 9.0, min_y: 9.0, max_x: 31.0, max_y: 21.0 });
}

#[test]
fn empty_path_has_no_bounds() {
    assert!(stroke(&[]).bounds().is_none());
}

#[test]
fn text_bounds_from_glyph_estimate() {
    let b = label("abcd").bounds().unwrap();
    assert_eq!(b.min_x, 10.0);
    assert_eq!(b.min_y, 20.0);
    assert!((b.max_x - 34.0).abs() < 1e-9);
    assert_eq!(b.max_y, 30.0);
}

#[test]
fn group_bounds_union_children() {
    let g = Drawable::group(vec![stroke(&[(0.0, 0.0)]), stroke(&[(50.0, 60.0)])]);
    let b = g.bounds().unwrap();
    assert_eq!(b, Bounds { min_x: -1.0, min_y: -1.0, max_x: 51.0, max_y: 61.0 });
}

#[test]
fn bounds_contains_with_slop() {
    let b = Bounds { min_x: 0.0, min_y: 0.0, max_x: 10.0, max_y: 10.0 };
    assert!(b.contains(Point::new(5.0, 5.0), 0.0));
    assert!(!b.contains(Point::new(12.0, 5.0), 0.0));
    assert!(b.contains(Point::new(12.0, 5.0), 3.0));
}

// =============================================================
// Scale
// =============================================================

#[test]
fn scale_path_points_width_and_tag() {
    let mut d = stroke(&[(10.0, 20.0)]);
    if let Shape::Path { canvas_width, .. } = &mut d.shape {
        *canvas_width = Some(100.0);
    }
    d.scale(2.0);
    let Shape::Path { points, stroke_width, canvas_width, .. } = &d.shape else {
        panic!("expected path");
    };
    assert_eq!(points[0], Point::new(20.0, 40.0));
    assert_eq!(*stroke_width, 4.0);
    assert_eq!(*canvas_width, Some(200.0));
}

#[test]
fn scale_text_and_group() {
    let mut g = Drawable::group(vec![label("a")]);
    g.scale(0.5);
    let Shape::Group { objects } = &g.shape else {
        panic!("expected group");
    };
    let Shape::Text { left, top, font_size, .. } = &objects[0].shape else {
        panic!("expected text");
    };
    assert_eq!((*left, *top, *font_size), (5.0, 10.0, 5.0));
}

#[test]
fn fit_to_width_rescales_tagged_paths_inside_groups() {
    let mut inner = stroke(&[(0.0, 0.0), (10.0, 10.0)]);
    if let Shape::Path { canvas_width, .. } = &mut inner.shape {
        *canvas_width = Some(320.0);
    }
    let untagged = stroke(&[(1.0, 1.0)]);
    let mut g = Drawable::group(vec![Drawable::group(vec![inner]), untagged.clone(), label("t")]);
    g.fit_to_width(640.0);

    let parts = g.flatten();
    let Shape::Path { points, stroke_width, canvas_width, .. } = &parts[0].shape else {
        panic!("expected path");
    };
    assert_eq!(points[1], Point::new(20.0, 20.0));
    assert_eq!(*stroke_width, 4.0);
    assert_eq!(*canvas_width, Some(640.0));
    assert_eq!(parts[1], &untagged);
    assert_eq!(parts[2].text_content(), Some("t"));
}

#[test]
fn fit_to_width_ignores_zero_widths() {
    let mut d = stroke(&[(5.0, 5.0)]);
    if let Shape::Path { canvas_width, .. } = &mut d.shape {
        *canvas_width = Some(0.0);
    }
    let before = d.clone();
    d.fit_to_width(640.0);
    assert_eq!(d, before);
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn refresh_parts_replaces_primitives_by_id() {
    let a = stroke(&[(0.0, 0.0)]);
    let b = label("old");
    let mut g = Drawable::group(vec![a.clone(), Drawable::group(vec![b.clone()])]);
    let group_id = g.id;

    let mut live_b = b.clone();
    if let Shape::Text { text, .. } = &mut live_b.shape {
        *text = "new".into();
    }
    live_b.has_controls = false;
    g.refresh_parts(&[live_b.clone(), label("stranger")]);

    assert_eq!(g.id, group_id);
    let parts = g.flatten();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], &a);
    assert_eq!(parts[1], &live_b);
}

#[test]
fn refresh_parts_on_primitive() {
    let mut a = stroke(&[(0.0, 0.0)]);
    let mut live = a.clone();
    live.lock_scaling = true;
    a.refresh_parts(&[]);
    assert!(!a.lock_scaling);
    a.refresh_parts(&[live]);
    assert!(a.lock_scaling);
}

// =============================================================
// Serde
// =============================================================

#[test]
fn path_serializes_with_type_tag_and_canvas_width() {
    let mut d = stroke(&[(1.0, 2.0)]);
    if let Shape::Path { canvas_width, .. } = &mut d.shape {
        *canvas_width = Some(640.0);
    }
    let value = serde_json::to_value(&d).unwrap();
    assert_eq!(value["type"], "path");
    assert_eq!(value["canvas_width"], 640.0);
    assert_eq!(value["points"], json!([{ "x": 1.0, "y": 2.0 }]));
}

#[test]
fn untagged_path_omits_canvas_width() {
    let value = serde_json::to_value(stroke(&[(1.0, 2.0)])).unwrap();
    assert!(value.get("canvas_width").is_none());
}

#[test]
fn deserialize_defaults_flags() {
    let id = Uuid::nil();
    let value = json!({
        "id": id,
        "type": "text",
        "text": "hello",
        "left": 1.0,
        "top": 2.0,
        "font_family": "arial",
        "fill": "#000",
        "font_size": 12.0
    });
    let d: Drawable = serde_json::from_value(value).unwrap();
    assert_eq!(d.id, id);
    assert_eq!(d.text_content(), Some("hello"));
    assert!(!d.lock_scaling);
    assert!(d.has_controls);
}

#[test]
fn nested_group_survives_serde() {
    let g = Drawable::group(vec![label("a"), Drawable::group(vec![stroke(&[(3.0, 4.0)])])]);
    let text = serde_json::to_string(&g).unwrap();
    let back: Drawable = serde_json::from_str(&text).unwrap();
    assert_eq!(back, g);
}

#[test]
fn unknown_type_rejected() {
    let value = json!({ "id": Uuid::nil(), "type": "hexagon" });
    assert!(serde_json::from_value::<Drawable>(value).is_err());
}
