//! Drawable primitives emitted per evaluation pass.
//!
//! The core never draws; it emits a flat list of [`Shape`]s once per
//! pass, and an external rendering surface (or the egui app behind the
//! `egui` feature) paints them.

use serde::Serialize;

use crate::layout;
use crate::pipeline::{Pipeline, Trace};

/// Stroke width of an unhighlighted stage rectangle.
pub const STAGE_STROKE_WIDTH: f32 = 1.0;
/// Stroke width of the highlighted stage rectangle.
pub const HIGHLIGHT_STROKE_WIDTH: f32 = 5.0;
/// Stroke width of connector segments.
pub const CONNECTOR_STROKE_WIDTH: f32 = 5.0;

/// A primitive for the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    /// A stage body rectangle.
    Rect {
        min_x: f32,
        min_y: f32,
        width: f32,
        height: f32,
        /// CSS-style fill color, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<&'static str>,
        stroke_width: f32,
    },
    /// A horizontal connector segment for one output line.
    Segment {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        /// Grayscale hex color derived from the line's text.
        stroke: String,
        stroke_width: f32,
    },
}

/// Build the primitives for one full pass: one rectangle per stage,
/// filled with the kind color and stroked heavier when highlighted,
/// plus one connector segment per output line running to the next
/// stage's left edge. The last stage has no downstream, so its output
/// produces no connectors.
pub fn build_scene(pipeline: &Pipeline, trace: &Trace, highlighted: Option<usize>) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for (position, tool) in pipeline.tools().iter().enumerate() {
        let region = layout::region_for(position);
        shapes.push(Shape::Rect {
            min_x: region.min_x,
            min_y: region.min_y,
            width: region.width,
            height: region.height,
            fill: tool.kind().color(),
            stroke_width: if highlighted == Some(position) {
                HIGHLIGHT_STROKE_WIDTH
            } else {
                STAGE_STROKE_WIDTH
            },
        });
        if position + 1 == pipeline.len() {
            continue;
        }
        let output = trace.output(position);
        let spacing = layout::output_spacing(output.len());
        for (index, line) in output.iter().enumerate() {
            let y = layout::connector_y(index, spacing);
            shapes.push(Shape::Segment {
                x1: region.max_x(),
                y1: y,
                x2: region.sink_min_x,
                y2: y,
                stroke: layout::line_color(line),
                stroke_width: CONNECTOR_STROKE_WIDTH,
            });
        }
    }
    shapes
}
