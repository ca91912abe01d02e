//! Annotation surface for media review.
//!
//! This crate backs the drawing overlay shown on top of a video or image
//! preview. The user draws freehand strokes and places text; every edit can be
//! undone and redone, and the drawing is captured into per-timestamp
//! annotation snapshots that the host persists on the preview record.
//!
//! The host is responsible only for wiring canvas events into
//! [`surface::AnnotationSurface`] and acting on the returned
//! [`surface::Action`]s (persisting on `SaveRequested`, repainting on
//! `RenderNeeded`).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`surface`] | Surface controller: mutation gateway, undo/redo, capture |
//! | [`history`] | Done/undone action stacks |
//! | [`snapshot`] | Timestamped snapshots and the drawing document format |
//! | [`drawable`] | Paths, text, groups, and group flattening |
//! | [`canvas`] | Canvas trait and the in-memory `SceneCanvas` |
//! | [`input`] | Tools, pencil presets, palettes, gesture state |
//! | [`hit`] | Hit-testing against drawables |
//! | [`config`] | Surface configuration and env overrides |
//! | [`error`] | `SurfaceError` |
//! | [`consts`] | Shared constants (brush widths, font sizing) |

pub mod canvas;
pub mod config;
pub mod consts;
pub mod drawable;
pub mod error;
pub mod history;
pub mod hit;
pub mod input;
pub mod snapshot;
pub mod surface;

pub use error::SurfaceError;
pub use surface::{Action, AnnotationSurface};
