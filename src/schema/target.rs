//! Target metadata schema: the output host's front-matter shape.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Capability names in the target schema. The set is closed: a target
/// document carries all eleven with an explicit boolean each.
///
/// Variant order is the fixed enumeration order used for emission; the
/// `Ord` derive makes a `BTreeMap<Capability, bool>` iterate in it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Read,
    Grep,
    Glob,
    Edit,
    Write,
    Bash,
    Webfetch,
    Todowrite,
    Todoread,
    List,
    Patch,
}

impl Capability {
    /// All capabilities in fixed enumeration order.
    pub const ALL: [Capability; 11] = [
        Capability::Read,
        Capability::Grep,
        Capability::Glob,
        Capability::Edit,
        Capability::Write,
        Capability::Bash,
        Capability::Webfetch,
        Capability::Todowrite,
        Capability::Todoread,
        Capability::List,
        Capability::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Read => "read",
            Capability::Grep => "grep",
            Capability::Glob => "glob",
            Capability::Edit => "edit",
            Capability::Write => "write",
            Capability::Bash => "bash",
            Capability::Webfetch => "webfetch",
            Capability::Todowrite => "todowrite",
            Capability::Todoread => "todoread",
            Capability::List => "list",
            Capability::Patch => "patch",
        }
    }

    pub fn from_name(name: &str) -> Option<Capability> {
        Capability::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution mode of a converted agent. The corpus policy fixes this to
/// `subagent`; the enum exists so the emitted value is typed, not a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Subagent,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Subagent
    }
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Subagent => "subagent",
        }
    }
}

/// Fully-defaulted target metadata, ready for emission. Built by the schema
/// mapper plus the policy defaulter; every capability is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMetadata {
    pub description: String,
    pub mode: ExecutionMode,
    pub temperature: f64,
    pub capabilities: BTreeMap<Capability, bool>,
}

/// Lenient view of a target document's front matter, used by the validator.
///
/// Generated documents should always satisfy the strict shape; this form
/// keeps every absence or type mismatch observable as a diagnostic instead
/// of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTargetMetadata {
    pub description: Option<String>,
    pub mode: Option<String>,
    pub temperature: Option<f64>,
    #[serde(default)]
    pub tools: BTreeMap<String, serde_yaml::Value>,
}

impl RawTargetMetadata {
    /// Parse the raw front-matter text of a target document.
    pub fn from_yaml(raw: &str) -> Result<Self, PipelineError> {
        serde_yaml::from_str(raw).map_err(|e| {
            PipelineError::MalformedDocument(format!("target front matter is not valid YAML: {}", e))
        })
    }
}
