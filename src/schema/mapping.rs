//! Static tool-to-capability mapping between the two schemas.
//!
//! The mapping is total over the known source vocabulary and matched
//! case-sensitively. An unrecognized name is an error: silently dropping a
//! declared capability is a correctness bug in this domain.

use crate::error::PipelineError;
use crate::schema::target::Capability;
use std::collections::BTreeMap;

/// The fixed source tool vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTool {
    Read,
    Write,
    Edit,
    MultiEdit,
    Bash,
    Glob,
    Grep,
    WebFetch,
}

impl SourceTool {
    /// Case-sensitive lookup against the fixed vocabulary.
    pub fn from_name(name: &str) -> Option<SourceTool> {
        match name {
            "Read" => Some(SourceTool::Read),
            "Write" => Some(SourceTool::Write),
            "Edit" => Some(SourceTool::Edit),
            "MultiEdit" => Some(SourceTool::MultiEdit),
            "Bash" => Some(SourceTool::Bash),
            "Glob" => Some(SourceTool::Glob),
            "Grep" => Some(SourceTool::Grep),
            "WebFetch" => Some(SourceTool::WebFetch),
            _ => None,
        }
    }

    /// The capability a source tool enables. `Edit` and `MultiEdit` both
    /// enable `edit`: an intentional many-to-one collapse, since the target
    /// host has a single editing permission.
    pub fn capability(self) -> Capability {
        match self {
            SourceTool::Read => Capability::Read,
            SourceTool::Write => Capability::Write,
            SourceTool::Edit | SourceTool::MultiEdit => Capability::Edit,
            SourceTool::Bash => Capability::Bash,
            SourceTool::Glob => Capability::Glob,
            SourceTool::Grep => Capability::Grep,
            SourceTool::WebFetch => Capability::Webfetch,
        }
    }
}

/// Map declared tool names to the capabilities they enable.
///
/// Pure and order-independent: the result depends only on the set of names,
/// not their order or repetition. Fails with `UnknownTool` on the first
/// unrecognized name. The result is partial; the policy defaulter fills the
/// remaining capabilities.
pub fn map_tools(tools: &[String]) -> Result<BTreeMap<Capability, bool>, PipelineError> {
    let mut capabilities = BTreeMap::new();
    for name in tools {
        let tool = SourceTool::from_name(name)
            .ok_or_else(|| PipelineError::UnknownTool(name.clone()))?;
        capabilities.insert(tool.capability(), true);
    }
    Ok(capabilities)
}
