//! Pipeline stages ("tools") and their configuration.
//!
//! A [`Tool`] is a pure function of `(config, input lines)` → output
//! lines. The variant set is closed: adding a behavior means adding a
//! variant here and a match arm in [`Tool::apply`], not a new type at
//! the call sites.
//!
//! Tools are never mutated in place. Reconfiguring a stage goes through
//! [`Tool::with_config`], which yields a brand-new tool of the same
//! kind (or an error, in which case the caller keeps the old one).

use anyhow::{Result, bail};
use regex::Regex;

/// Discriminant for the closed set of tool behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Source,
    Batcher,
    Filter,
    Sink,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Source => "Source",
            ToolKind::Batcher => "Batcher",
            ToolKind::Filter => "Filter",
            ToolKind::Sink => "Sink",
        }
    }

    /// Fill color of the stage rectangle. Presentation only; never used
    /// in pipeline logic. The sink is drawn unfilled.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            ToolKind::Source => Some("purple"),
            ToolKind::Batcher => Some("green"),
            ToolKind::Filter => Some("blue"),
            ToolKind::Sink => None,
        }
    }
}

/// One pipeline stage.
#[derive(Debug, Clone)]
pub enum Tool {
    /// Injects its literal text, split on line breaks. Ignores any
    /// upstream input (by convention it sits at position 0).
    Source { text: String },
    /// Flattens input lines into whitespace tokens and regroups them
    /// into lines of `group_size` tokens each. `None` groups all
    /// tokens into a single line.
    Batcher { group_size: Option<u32> },
    /// Keeps the input lines matching the pattern.
    Filter { pattern: Regex },
    /// Terminal stage: passes its input through unchanged. Exists to
    /// occupy the last position and be drawn.
    Sink,
}

impl Tool {
    pub fn source(text: impl Into<String>) -> Self {
        Tool::Source { text: text.into() }
    }

    /// A batcher with the given group size. Zero or negative sizes are
    /// treated as unset (group everything into one line).
    pub fn batcher(group_size: Option<i64>) -> Self {
        let group_size = group_size
            .filter(|&n| n > 0)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX));
        Tool::Batcher { group_size }
    }

    /// A filter for the given regular expression. The pattern compiles
    /// once, here; an invalid pattern is rejected before the tool ever
    /// enters a pipeline.
    pub fn filter(pattern: &str) -> Result<Self> {
        let pattern =
            Regex::new(pattern).map_err(|e| anyhow::anyhow!("invalid filter pattern: {e}"))?;
        Ok(Tool::Filter { pattern })
    }

    pub fn sink() -> Self {
        Tool::Sink
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Source { .. } => ToolKind::Source,
            Tool::Batcher { .. } => ToolKind::Batcher,
            Tool::Filter { .. } => ToolKind::Filter,
            Tool::Sink => ToolKind::Sink,
        }
    }

    /// Run the transform. `None` input means "no upstream" and is only
    /// meaningful for the first stage; every non-source kind treats it
    /// as an empty sequence. Deterministic and side-effect free.
    pub fn apply(&self, input: Option<&[String]>) -> Vec<String> {
        match self {
            Tool::Source { text } => text.split('\n').map(str::to_string).collect(),
            Tool::Batcher { group_size } => {
                let mut tokens: Vec<&str> = Vec::new();
                if let Some(lines) = input {
                    for line in lines {
                        tokens.extend(line.split_whitespace());
                    }
                }
                if tokens.is_empty() {
                    return Vec::new();
                }
                let n = match group_size {
                    Some(n) => *n as usize,
                    None => tokens.len(),
                };
                tokens.chunks(n).map(|group| group.join(" ")).collect()
            }
            Tool::Filter { pattern } => input
                .map(|lines| {
                    lines
                        .iter()
                        .filter(|line| pattern.is_match(line))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            Tool::Sink => input.map(<[String]>::to_vec).unwrap_or_default(),
        }
    }

    /// Declarative description of this tool's editable configuration,
    /// consumed by an external widget renderer. The sink has none.
    pub fn describe_config(&self) -> Option<ConfigDescriptor> {
        let field = match self {
            Tool::Source { text } => ConfigField::Text(text.clone()),
            Tool::Batcher { group_size } => ConfigField::Integer(*group_size),
            Tool::Filter { pattern } => ConfigField::Pattern(pattern.as_str().to_string()),
            Tool::Sink => return None,
        };
        Some(ConfigDescriptor {
            label: self.kind().name(),
            field,
        })
    }

    /// Build a new tool of the same kind from an updated configuration
    /// value. Fails on a kind/value mismatch or on invalid
    /// configuration (e.g. an unparsable filter pattern); the caller is
    /// expected to keep the previous tool in that case.
    pub fn with_config(&self, value: ConfigValue) -> Result<Tool> {
        match (self, value) {
            (Tool::Source { .. }, ConfigValue::Text(text)) => Ok(Tool::source(text)),
            (Tool::Batcher { .. }, ConfigValue::Integer(n)) => Ok(Tool::batcher(n)),
            (Tool::Filter { .. }, ConfigValue::Pattern(p)) => Tool::filter(&p),
            (Tool::Sink, _) => bail!("sink stage has no configuration"),
            (tool, value) => bail!(
                "{} stage cannot be configured with a {} value",
                tool.kind().name(),
                value.kind_name(),
            ),
        }
    }
}

/// Description of a tool's single editable field, plus its current
/// value. The tool never touches presentation code; the external
/// widget renderer turns this into a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDescriptor {
    /// Display label (the tool kind name).
    pub label: &'static str,
    pub field: ConfigField,
}

/// Field kind and current value of an editable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigField {
    /// Free multi-line text.
    Text(String),
    /// Positive group size; `None` means "group everything".
    Integer(Option<u32>),
    /// Regular expression source text.
    Pattern(String),
}

/// A new configuration value submitted by the widget renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    Integer(Option<i64>),
    Pattern(String),
}

impl ConfigValue {
    fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Text(_) => "text",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Pattern(_) => "pattern",
        }
    }
}
