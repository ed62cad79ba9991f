//! Text-pipeline visualization core.
//!
//! This crate models an ordered chain of text-processing tools
//! (source → batcher → filter → sink), re-evaluates the whole chain
//! deterministically on every configuration change, and maps each
//! stage to a deterministic screen region for drawing and hit-testing.
//!
//! The binary `pipevis` evaluates a pipeline description and prints the
//! resulting per-stage trace as JSON.

pub mod layout;
pub mod model;
pub mod pipeline;
pub mod scene;
pub mod selection;
pub mod tool;

// Optional GUI/egui functionality lives behind the `egui` feature flag.
// This module provides an interactive pipeline editor and is used by
// the demo in demos/pipeline_editor.rs.
#[cfg(feature = "egui")]
pub mod egui_app;
