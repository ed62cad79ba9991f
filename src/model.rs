//! Serializable pipeline descriptions.
//!
//! [`PipelineSpec`] is the JSON-facing form of a pipeline, used by the
//! CLI and by tests. Building the runtime [`Pipeline`] from a spec is
//! where all configuration validation happens: an unparsable filter
//! pattern or a broken sink invariant is rejected here, before any
//! evaluation begins. An unknown `kind` is a deserialization error,
//! never a silent default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pipeline::Pipeline;
use crate::tool::Tool;

/// Serializable description of a single tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ToolSpec {
    Source {
        text: String,
    },
    Batcher {
        /// Positive group size; absent, zero, or negative all mean
        /// "group everything into one line".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group_size: Option<i64>,
    },
    Filter {
        pattern: String,
    },
    Sink,
}

impl ToolSpec {
    /// Build the runtime tool. Fails fast on invalid configuration.
    pub fn build(&self) -> Result<Tool> {
        match self {
            ToolSpec::Source { text } => Ok(Tool::source(text.clone())),
            ToolSpec::Batcher { group_size } => Ok(Tool::batcher(*group_size)),
            ToolSpec::Filter { pattern } => Tool::filter(pattern),
            ToolSpec::Sink => Ok(Tool::sink()),
        }
    }

    /// The spec form of an existing tool.
    pub fn of(tool: &Tool) -> ToolSpec {
        match tool {
            Tool::Source { text } => ToolSpec::Source { text: text.clone() },
            Tool::Batcher { group_size } => ToolSpec::Batcher {
                group_size: group_size.map(i64::from),
            },
            Tool::Filter { pattern } => ToolSpec::Filter {
                pattern: pattern.as_str().to_string(),
            },
            Tool::Sink => ToolSpec::Sink,
        }
    }
}

/// Serializable description of a whole pipeline: a JSON array of tool
/// specs in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineSpec {
    pub tools: Vec<ToolSpec>,
}

impl PipelineSpec {
    /// The built-in demo pipeline used when no description file is given.
    pub fn demo() -> Self {
        PipelineSpec {
            tools: vec![
                ToolSpec::Source {
                    text: "hello\nworld\n It's been   real, but ultimately\n We all end up telling lies."
                        .to_string(),
                },
                ToolSpec::Batcher { group_size: Some(5) },
                ToolSpec::Filter {
                    pattern: "l+".to_string(),
                },
                ToolSpec::Batcher { group_size: Some(1) },
                ToolSpec::Sink,
            ],
        }
    }

    /// Load a pipeline description from a JSON file.
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Open {}", path.as_ref().display()))?;
        let spec: PipelineSpec = serde_json::from_str(&text)
            .with_context(|| format!("Parse {}", path.as_ref().display()))?;
        Ok(spec)
    }

    /// Save the pipeline description as pretty-printed JSON.
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, text)
            .with_context(|| format!("Write {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Build and validate the runtime pipeline.
    pub fn build(&self) -> Result<Pipeline> {
        let tools = self
            .tools
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                spec.build()
                    .with_context(|| format!("stage {i} has invalid configuration"))
            })
            .collect::<Result<Vec<Tool>>>()?;
        Pipeline::new(tools)
    }

    /// The spec form of an existing pipeline.
    pub fn of(pipeline: &Pipeline) -> PipelineSpec {
        PipelineSpec {
            tools: pipeline.tools().iter().map(ToolSpec::of).collect(),
        }
    }
}
