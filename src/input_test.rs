#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_variants_distinct() {
    assert_ne!(Tool::Select, Tool::Pencil);
    assert_ne!(Tool::Pencil, Tool::Text);
    assert_ne!(Tool::Text, Tool::Select);
}

// =============================================================
// PencilSize
// =============================================================

#[test]
fn pencil_widths() {
    assert_eq!(PencilSize::Big.width(), 4.0);
    assert_eq!(PencilSize::Medium.width(), 2.0);
    assert_eq!(PencilSize::Small.width(), 1.0);
}

#[test]
fn pencil_serde_lowercase() {
    assert_eq!(serde_json::to_string(&PencilSize::Medium).unwrap(), "\"medium\"");
    let back: PencilSize = serde_json::from_str("\"small\"").unwrap();
    assert_eq!(back, PencilSize::Small);
    assert!(serde_json::from_str::<PencilSize>("\"huge\"").is_err());
}

// =============================================================
// UiState / InputState
// =============================================================

#[test]
fn ui_default_has_closed_palettes_and_no_edit() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert_eq!(ui.pencil, PencilSize::Big);
    assert_eq!(ui.palettes, Palettes { color_open: false, pencil_open: false });
    assert!(ui.text_edit.is_none());
}

#[test]
fn input_default_is_idle() {
    let s = InputState::default();
    assert_eq!(s, InputState::Idle);
    assert!(!s.is_drawing());
}

#[test]
fn drawing_state_reports_drawing() {
    let s = InputState::Drawing { points: vec![Point::new(1.0, 2.0)], adopted: vec![] };
    assert!(s.is_drawing());
}
