//! Agent document model and identity.

use crate::error::PipelineError;
use crate::parser::{self, FrontMatter};
use crate::schema::source::SourceMetadata;
use crate::schema::target::RawTargetMetadata;
use std::path::{Path, PathBuf};

/// Which metadata shape a document carries. The validator dispatches on
/// this; narrative documents (no front matter) are valid corpus members.
#[derive(Debug, Clone)]
pub enum Metadata {
    Source(SourceMetadata),
    Target(RawTargetMetadata),
    Narrative,
}

/// One agent document: a stable id derived from the filename, a parsed
/// metadata shape, and the untouched body.
#[derive(Debug, Clone)]
pub struct AgentDocument {
    pub id: String,
    pub path: PathBuf,
    pub metadata: Metadata,
    pub body: String,
}

impl AgentDocument {
    /// Parse raw document text into a document.
    ///
    /// Shape dispatch: a block with a top-level `mode` field is target
    /// metadata (the source schema has no such field); any other block is
    /// source metadata; no block means narrative.
    pub fn parse(id: String, path: PathBuf, raw: &str) -> Result<Self, PipelineError> {
        let (front_matter, body) = parser::split_front_matter(raw)?;
        let metadata = match front_matter {
            Some(fm) => Self::interpret_block(&fm)?,
            None => Metadata::Narrative,
        };
        Ok(AgentDocument {
            id,
            path,
            metadata,
            body,
        })
    }

    fn interpret_block(front_matter: &FrontMatter) -> Result<Metadata, PipelineError> {
        if front_matter.has("mode") {
            Ok(Metadata::Target(RawTargetMetadata::from_yaml(
                &front_matter.raw,
            )?))
        } else {
            Ok(Metadata::Source(SourceMetadata::from_front_matter(
                front_matter,
            )))
        }
    }

    /// Description for the index: declared metadata first, otherwise the
    /// first non-empty body line with any markdown heading markers stripped.
    pub fn index_description(&self) -> String {
        let declared = match &self.metadata {
            Metadata::Source(meta) => Some(meta.description.clone()),
            Metadata::Target(meta) => meta.description.clone(),
            Metadata::Narrative => None,
        };
        if let Some(desc) = declared {
            if !desc.is_empty() {
                return first_line(&desc);
            }
        }
        self.body
            .lines()
            .map(|line| line.trim().trim_start_matches('#').trim())
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .unwrap_or_default()
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().trim().to_string()
}

/// Derive a document id from its filename: the stem, lowercased, with
/// spaces and underscores folded to hyphens. Immutable once created.
pub fn id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}
