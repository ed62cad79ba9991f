//! Pipeline assembly and evaluation.
//!
//! A [`Pipeline`] is a validated, ordered chain of tools; a stage's
//! position is both its array index and its spatial ordinal. Pipelines
//! are immutable values: edits go through [`Pipeline::replace`], which
//! yields a new pipeline, so readers always see a fully-formed
//! snapshot.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use crate::tool::{Tool, ToolKind};

/// An ordered chain of tools. Validated on construction: non-empty,
/// with exactly one sink, which is the last stage.
#[derive(Debug, Clone)]
pub struct Pipeline {
    tools: Vec<Tool>,
}

impl Pipeline {
    pub fn new(tools: Vec<Tool>) -> Result<Self> {
        if tools.is_empty() {
            bail!("pipeline must contain at least one stage");
        }
        let sinks = tools.iter().filter(|t| t.kind() == ToolKind::Sink).count();
        if sinks != 1 {
            bail!("pipeline must contain exactly one sink stage, found {sinks}");
        }
        if tools.last().map(Tool::kind) != Some(ToolKind::Sink) {
            bail!("the sink must be the last stage of the pipeline");
        }
        Ok(Self { tools })
    }

    /// Number of stages. Never zero.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn tool(&self, position: usize) -> Option<&Tool> {
        self.tools.get(position)
    }

    /// Produce a new pipeline with the stage at `position` replaced.
    /// Re-validates the sink invariant; `self` is left untouched.
    pub fn replace(&self, position: usize, tool: Tool) -> Result<Pipeline> {
        if position >= self.tools.len() {
            bail!(
                "stage position {position} out of range for pipeline of {} stages",
                self.tools.len()
            );
        }
        let mut tools = self.tools.clone();
        tools[position] = tool;
        Self::new(tools)
    }

    /// Run every stage front to back: stage 0 receives no input, stage
    /// i receives stage i-1's output. Always a full re-run; the chain
    /// is short, so there is no incremental recomputation.
    pub fn evaluate(&self) -> Trace {
        debug!(stages = self.tools.len(), "evaluating pipeline");
        let mut outputs: Vec<Vec<String>> = Vec::with_capacity(self.tools.len());
        for (i, tool) in self.tools.iter().enumerate() {
            let input = if i == 0 {
                None
            } else {
                Some(outputs[i - 1].as_slice())
            };
            let output = tool.apply(input);
            outputs.push(output);
        }
        Trace { outputs }
    }
}

/// The per-stage output line sets of one evaluation pass. Recomputed
/// from scratch on every pipeline mutation; never persisted across
/// edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    outputs: Vec<Vec<String>>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn outputs(&self) -> &[Vec<String>] {
        &self.outputs
    }

    /// Output lines of the stage at `position` (empty if out of range).
    pub fn output(&self, position: usize) -> &[String] {
        self.outputs
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Input lines of the stage at `position`: stage i's input is stage
    /// i-1's output, and stage 0 has none.
    pub fn input(&self, position: usize) -> &[String] {
        if position == 0 {
            &[]
        } else {
            self.output(position - 1)
        }
    }
}

/// Reconfigure the stage at `position` via [`Tool::with_config`] and
/// return the updated pipeline. On any failure (invalid configuration,
/// kind mismatch, broken sink invariant) the original pipeline is
/// untouched and the previous tool remains in effect.
pub fn reconfigure(
    pipeline: &Pipeline,
    position: usize,
    value: crate::tool::ConfigValue,
) -> Result<Pipeline> {
    let tool = pipeline
        .tool(position)
        .with_context(|| format!("no stage at position {position}"))?;
    let updated = tool.with_config(value)?;
    pipeline.replace(position, updated)
}
