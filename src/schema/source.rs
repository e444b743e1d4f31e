//! Source metadata schema: the input host's front-matter shape.

use crate::parser::FrontMatter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata as declared by a source document: a name that must match the
/// document id, a description, and a flat comma-separated tool list.
///
/// Tool names are kept exactly as declared (order and repetition included)
/// so that validation and mapping can report what the author wrote; set
/// semantics are applied by the mapper. Unmodeled fields are carried in
/// `extra` for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub name: String,
    pub description: String,
    pub tools: Vec<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl SourceMetadata {
    /// Interpret a tolerant front-matter block as source metadata.
    ///
    /// Missing fields become empty values here; the validator owns the
    /// decision about which absences are diagnostics.
    pub fn from_front_matter(front_matter: &FrontMatter) -> Self {
        let name = front_matter.get("name").unwrap_or_default().to_string();
        let description = front_matter
            .get("description")
            .unwrap_or_default()
            .to_string();
        let tools = front_matter
            .get("tools")
            .map(parse_tool_list)
            .unwrap_or_default();

        let mut extra = BTreeMap::new();
        for (key, value) in &front_matter.fields {
            match key.as_str() {
                "name" | "description" | "tools" => {}
                _ => {
                    extra.insert(key.clone(), value.clone());
                }
            }
        }

        SourceMetadata {
            name,
            description,
            tools,
            extra,
        }
    }
}

/// Split a comma-separated tool declaration, dropping empty entries.
fn parse_tool_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
