//! Schema validator: independent checks over either metadata shape.
//!
//! All checks run; failures are collected, never short-circuited. An empty
//! diagnostic list means the document is valid.

use crate::document::{AgentDocument, Metadata};
use crate::schema::mapping::SourceTool;
use crate::schema::target::Capability;
use serde::Serialize;

/// Maximum accepted description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// One validation failure, attributed to a document and a named check.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub document: String,
    pub check: String,
    pub message: String,
}

impl Diagnostic {
    fn new(document: &str, check: &str, message: String) -> Self {
        Diagnostic {
            document: document.to_string(),
            check: check.to_string(),
            message,
        }
    }
}

/// Validate a document against schema invariants, dispatching on which
/// metadata shape was parsed. Narrative documents are only held to the id
/// invariant.
pub fn validate(doc: &AgentDocument) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    check_id(doc, &mut diagnostics);
    match &doc.metadata {
        Metadata::Source(meta) => {
            check_description(&doc.id, Some(meta.description.as_str()), &mut diagnostics);
            check_name_matches_id(doc, &meta.name, &mut diagnostics);
            check_source_tools(&doc.id, &meta.tools, &mut diagnostics);
        }
        Metadata::Target(meta) => {
            check_description(&doc.id, meta.description.as_deref(), &mut diagnostics);
            check_target_mode(&doc.id, meta.mode.as_deref(), &mut diagnostics);
            check_target_temperature(&doc.id, meta.temperature, &mut diagnostics);
            check_target_capabilities(&doc.id, &meta.tools, &mut diagnostics);
        }
        Metadata::Narrative => {}
    }

    diagnostics
}

/// Id invariant: `^[a-z][a-z0-9-]*$`.
fn check_id(doc: &AgentDocument, out: &mut Vec<Diagnostic>) {
    let mut chars = doc.id.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_lowercase()
                && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        }
        None => false,
    };
    if !valid {
        out.push(Diagnostic::new(
            &doc.id,
            "id",
            format!("id '{}' must match ^[a-z][a-z0-9-]*$", doc.id),
        ));
    }
}

fn check_description(id: &str, description: Option<&str>, out: &mut Vec<Diagnostic>) {
    match description {
        None | Some("") => out.push(Diagnostic::new(
            id,
            "description",
            "description is missing or empty".to_string(),
        )),
        Some(desc) if desc.chars().count() > MAX_DESCRIPTION_LEN => out.push(Diagnostic::new(
            id,
            "description",
            format!(
                "description is {} characters, maximum is {}",
                desc.chars().count(),
                MAX_DESCRIPTION_LEN
            ),
        )),
        Some(_) => {}
    }
}

fn check_name_matches_id(doc: &AgentDocument, name: &str, out: &mut Vec<Diagnostic>) {
    if name != doc.id {
        out.push(Diagnostic::new(
            &doc.id,
            "name",
            format!("declared name '{}' does not match id '{}'", name, doc.id),
        ));
    }
}

fn check_source_tools(id: &str, tools: &[String], out: &mut Vec<Diagnostic>) {
    for name in tools {
        if SourceTool::from_name(name).is_none() {
            out.push(Diagnostic::new(
                id,
                "tools",
                format!("unrecognized tool '{}'", name),
            ));
        }
    }
}

fn check_target_mode(id: &str, mode: Option<&str>, out: &mut Vec<Diagnostic>) {
    if mode != Some("subagent") {
        out.push(Diagnostic::new(
            id,
            "mode",
            format!("mode must be 'subagent', found {:?}", mode),
        ));
    }
}

fn check_target_temperature(id: &str, temperature: Option<f64>, out: &mut Vec<Diagnostic>) {
    match temperature {
        Some(t) if (0.0..=1.0).contains(&t) => {}
        Some(t) => out.push(Diagnostic::new(
            id,
            "temperature",
            format!("temperature {} is outside [0, 1]", t),
        )),
        None => out.push(Diagnostic::new(
            id,
            "temperature",
            "temperature is missing".to_string(),
        )),
    }
}

/// All eleven capability names must be present with explicit booleans.
fn check_target_capabilities(
    id: &str,
    tools: &std::collections::BTreeMap<String, serde_yaml::Value>,
    out: &mut Vec<Diagnostic>,
) {
    for cap in Capability::ALL {
        match tools.get(cap.as_str()) {
            Some(serde_yaml::Value::Bool(_)) => {}
            Some(other) => out.push(Diagnostic::new(
                id,
                "tools",
                format!("capability '{}' must be a boolean, found {:?}", cap, other),
            )),
            None => out.push(Diagnostic::new(
                id,
                "tools",
                format!("capability '{}' is missing", cap),
            )),
        }
    }
    for name in tools.keys() {
        if Capability::from_name(name).is_none() {
            out.push(Diagnostic::new(
                id,
                "tools",
                format!("'{}' is not a known capability", name),
            ));
        }
    }
}
