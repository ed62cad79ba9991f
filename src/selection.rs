//! Stage selection and inspection.
//!
//! Tracks which stage is highlighted and surfaces that stage's input
//! and output line sets plus its configuration descriptor.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pipevis::selection::StageSelection;
//!
//! let mut sel = StageSelection::new();
//! sel.pointer_released(&pipeline, 120.0, 200.0);
//! let desc = sel.config_descriptor(&pipeline);
//! let inputs = sel.input_lines(&trace);
//! ```

use anyhow::Result;
use tracing::debug;

use crate::layout;
use crate::pipeline::{self, Pipeline, Trace};
use crate::tool::{ConfigDescriptor, ConfigValue};

/// The highlighted-stage state machine. Starts with stage 0
/// highlighted; the only transition is a pointer release.
#[derive(Debug, Clone)]
pub struct StageSelection {
    highlighted: usize,
}

impl Default for StageSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl StageSelection {
    pub fn new() -> Self {
        Self { highlighted: 0 }
    }

    /// Position of the highlighted stage.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Handle a pointer release at `(x, y)`. Every stage region is
    /// tested in ascending position order without short-circuiting, so
    /// the last hit wins if regions ever overlap. A release outside
    /// every region leaves the highlight unchanged.
    ///
    /// Returns true if the highlight changed.
    pub fn pointer_released(&mut self, pipeline: &Pipeline, x: f32, y: f32) -> bool {
        let before = self.highlighted;
        for position in 0..pipeline.len() {
            if layout::is_inside(position, x, y) {
                self.highlighted = position;
            }
        }
        if self.highlighted != before {
            debug!(stage = self.highlighted, "stage highlighted");
        }
        self.highlighted != before
    }

    /// Configuration descriptor of the highlighted stage, for the
    /// external widget renderer. `None` for the sink (or if the
    /// highlight is out of range for this pipeline).
    pub fn config_descriptor(&self, pipeline: &Pipeline) -> Option<ConfigDescriptor> {
        pipeline.tool(self.highlighted)?.describe_config()
    }

    /// Lines entering the highlighted stage (empty for stage 0).
    pub fn input_lines<'a>(&self, trace: &'a Trace) -> &'a [String] {
        trace.input(self.highlighted)
    }

    /// Lines produced by the highlighted stage.
    pub fn output_lines<'a>(&self, trace: &'a Trace) -> &'a [String] {
        trace.output(self.highlighted)
    }

    /// Apply a new configuration value to the highlighted stage,
    /// returning the updated pipeline. On failure the original
    /// pipeline is untouched.
    pub fn reconfigure(&self, pipeline: &Pipeline, value: ConfigValue) -> Result<Pipeline> {
        pipeline::reconfigure(pipeline, self.highlighted, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::region_for;
    use crate::tool::Tool;

    fn make_test_pipeline() -> Pipeline {
        Pipeline::new(vec![
            Tool::source("hello\nworld"),
            Tool::batcher(Some(1)),
            Tool::sink(),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_highlight_is_stage_zero() {
        let sel = StageSelection::new();
        assert_eq!(sel.highlighted(), 0);
    }

    #[test]
    fn test_pointer_release_inside_stage() {
        let pipeline = make_test_pipeline();
        let mut sel = StageSelection::new();

        let r = region_for(1);
        let changed = sel.pointer_released(&pipeline, r.min_x + 1.0, r.min_y + 1.0);
        assert!(changed);
        assert_eq!(sel.highlighted(), 1);
    }

    #[test]
    fn test_pointer_release_outside_keeps_highlight() {
        let pipeline = make_test_pipeline();
        let mut sel = StageSelection::new();
        sel.pointer_released(&pipeline, region_for(2).min_x, region_for(2).min_y);
        assert_eq!(sel.highlighted(), 2);

        let changed = sel.pointer_released(&pipeline, 0.0, 0.0);
        assert!(!changed);
        assert_eq!(sel.highlighted(), 2);
    }

    #[test]
    fn test_inspection_panels() {
        let pipeline = make_test_pipeline();
        let trace = pipeline.evaluate();
        let mut sel = StageSelection::new();

        // Stage 0 has no upstream input.
        assert!(sel.input_lines(&trace).is_empty());
        assert_eq!(sel.output_lines(&trace), &["hello", "world"]);

        let r = region_for(1);
        sel.pointer_released(&pipeline, r.min_x, r.min_y);
        assert_eq!(sel.input_lines(&trace), &["hello", "world"]);
        assert_eq!(sel.output_lines(&trace), &["hello", "world"]);
    }

    #[test]
    fn test_config_descriptor_none_for_sink() {
        let pipeline = make_test_pipeline();
        let mut sel = StageSelection::new();
        assert!(sel.config_descriptor(&pipeline).is_some());

        let r = region_for(2);
        sel.pointer_released(&pipeline, r.min_x, r.min_y);
        assert!(sel.config_descriptor(&pipeline).is_none());
    }

    #[test]
    fn test_reconfigure_failure_keeps_pipeline() {
        let pipeline = Pipeline::new(vec![
            Tool::source("a"),
            Tool::filter("a+").unwrap(),
            Tool::sink(),
        ])
        .unwrap();
        let mut sel = StageSelection::new();
        let r = region_for(1);
        sel.pointer_released(&pipeline, r.min_x, r.min_y);

        let result = sel.reconfigure(&pipeline, ConfigValue::Pattern("[".to_string()));
        assert!(result.is_err());
        // The previous tool is still in effect.
        let trace = pipeline.evaluate();
        assert_eq!(trace.output(1), &["a"]);
    }
}
