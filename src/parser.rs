//! Document parser: splits a document into front matter and an opaque body.
//!
//! The body is carried by byte offset, never reconstructed, so emission can
//! preserve it verbatim. Parsing is per-document with no shared state.

use crate::error::PipelineError;

/// Front-matter marker line. A block is recognized only when the first line
/// of the document is exactly this marker.
pub const MARKER: &str = "---";

/// A parsed front-matter block.
///
/// `raw` is the text between the markers, verbatim, for schema-aware parsing.
/// `fields` is a tolerant line-level view: duplicate keys are all retained
/// (lookups take the last occurrence), indented lines are folded into the
/// preceding field as continuations, and comment or blank lines are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub raw: String,
    pub fields: Vec<(String, String)>,
}

impl FrontMatter {
    /// Look up a field by key; the last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }
}

/// Split a document into an optional front-matter block and the body.
///
/// A document that does not open with the marker is pure body with no
/// metadata; many documents in the corpus are narrative-only and must pass
/// through unchanged. A start marker without a matching end marker is a
/// `MalformedDocument` error.
pub fn split_front_matter(raw: &str) -> Result<(Option<FrontMatter>, String), PipelineError> {
    let mut lines = raw.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) => line,
        None => return Ok((None, String::new())),
    };
    if first.trim_end() != MARKER {
        return Ok((None, raw.to_string()));
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == MARKER {
            let block = &raw[block_start..offset];
            let body = &raw[offset + line.len()..];
            return Ok((
                Some(FrontMatter {
                    raw: block.to_string(),
                    fields: parse_fields(block),
                }),
                body.to_string(),
            ));
        }
        offset += line.len();
    }

    Err(PipelineError::MalformedDocument(
        "front-matter start marker without matching end marker".to_string(),
    ))
}

/// Tolerant line-level field scan of a front-matter block.
fn parse_fields(block: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indented = line.starts_with(' ') || line.starts_with('\t');
        if !indented {
            if let Some((key, value)) = line.split_once(':') {
                if !key.trim().is_empty() {
                    fields.push((key.trim().to_string(), value.trim().to_string()));
                    continue;
                }
            }
        }
        // Continuation of the previous field (indented or colon-free line).
        if let Some((_, value)) = fields.last_mut() {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(trimmed);
        }
    }
    fields
}
