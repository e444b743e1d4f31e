//! Document emitter: serializes target metadata plus the preserved body.
//!
//! Emission is byte-stable: field order is fixed by the front-matter struct,
//! capability order by the enumeration order of `Capability`, and the body
//! is appended verbatim. Re-running over identical logical input yields
//! identical bytes.

use crate::error::PipelineError;
use crate::parser::MARKER;
use crate::schema::target::{Capability, ExecutionMode, TargetMetadata};
use serde::Serialize;
use std::collections::BTreeMap;

/// Serialization order: description, mode, temperature, tools.
#[derive(Serialize)]
struct TargetFrontMatter<'a> {
    description: &'a str,
    mode: ExecutionMode,
    temperature: f64,
    tools: &'a BTreeMap<Capability, bool>,
}

/// Serialize target metadata and body into document text.
pub fn emit(metadata: &TargetMetadata, body: &str) -> Result<String, PipelineError> {
    let front_matter = TargetFrontMatter {
        description: &metadata.description,
        mode: metadata.mode,
        temperature: metadata.temperature,
        tools: &metadata.capabilities,
    };
    let yaml = serde_yaml::to_string(&front_matter).map_err(|e| {
        PipelineError::MalformedDocument(format!("failed to serialize target metadata: {}", e))
    })?;
    Ok(format!("{MARKER}\n{yaml}{MARKER}\n{body}"))
}
