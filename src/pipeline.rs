//! Pipeline driver: discovery, conversion, validation, and index rebuild.
//!
//! Each operation is atomic per document: a failure on one document is
//! recorded in the run report and the batch continues. The invocation as a
//! whole fails only when zero documents could be processed. The index is
//! rebuilt strictly after all conversions in the run complete.

use crate::config::PipelineConfig;
use crate::document::{id_from_path, AgentDocument, Metadata};
use crate::emitter;
use crate::error::PipelineError;
use crate::index::{build_index, IndexEntry};
use crate::schema::mapping::map_tools;
use crate::validator::{validate, Diagnostic};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A source document found during discovery, keyed by its derived id.
#[derive(Debug, Clone)]
pub struct DiscoveredDocument {
    pub id: String,
    pub path: PathBuf,
}

/// A discovery-time duplicate: two files sharing one id. The first
/// occurrence (shallowest path, then lexicographic) is kept.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateEntry {
    pub id: String,
    pub kept: PathBuf,
    pub ignored: PathBuf,
}

/// A document that could not be processed; named explicitly in output,
/// never skipped silently.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub id: String,
    pub path: PathBuf,
    pub error: String,
}

/// Result of `convert_all`.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    pub converted: Vec<String>,
    pub passed_through: Vec<String>,
    pub failed: Vec<FailureEntry>,
    pub duplicates: Vec<DuplicateEntry>,
    pub index_path: PathBuf,
}

/// Result of `validate_all`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateReport {
    pub documents_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidateReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Result of `rebuild_index_only`.
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    pub entries: usize,
    pub index_path: PathBuf,
    pub duplicates: Vec<DuplicateEntry>,
}

/// Result of the smoke test: one named check per pipeline stage.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    pub checks: Vec<(String, bool)>,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|(_, ok)| *ok)
    }
}

/// The pipeline driver. Owns the corpus scan and every in-memory document
/// for a single run; nothing is shared across runs.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Discover source documents: every `.md` file under the source
    /// directory, shallowest path first, de-duplicated by id (first wins).
    pub fn discover(
        &self,
    ) -> Result<(Vec<DiscoveredDocument>, Vec<DuplicateEntry>), PipelineError> {
        let root = &self.config.source_dir;
        if !root.is_dir() {
            return Err(PipelineError::NothingProcessed(format!(
                "source directory {} does not exist",
                root.display()
            )));
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                PipelineError::io(
                    root.clone(),
                    std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
                )
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if path.starts_with(&self.config.output_dir) || is_hidden(path, root) {
                continue;
            }
            paths.push(path.to_path_buf());
        }
        paths.sort_by_key(|p| (p.components().count(), p.clone()));

        let mut documents: Vec<DiscoveredDocument> = Vec::new();
        let mut duplicates = Vec::new();
        for path in paths {
            let id = id_from_path(&path);
            if let Some(kept) = documents.iter().find(|d| d.id == id) {
                warn!(id = %id, kept = %kept.path.display(), ignored = %path.display(),
                    "duplicate document id; keeping first occurrence");
                duplicates.push(DuplicateEntry {
                    id,
                    kept: kept.path.clone(),
                    ignored: path,
                });
                continue;
            }
            documents.push(DiscoveredDocument { id, path });
        }

        Ok((documents, duplicates))
    }

    /// Convert every discovered source document and rebuild the index.
    pub fn convert_all(&self) -> Result<ConvertReport, PipelineError> {
        let (discovered, duplicates) = self.discover()?;
        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| PipelineError::io(&self.config.output_dir, e))?;

        let mut converted = Vec::new();
        let mut passed_through = Vec::new();
        let mut failed = Vec::new();
        let mut entries: Vec<IndexEntry> = Vec::new();

        for disc in &discovered {
            match self.convert_one(disc) {
                Ok((entry, was_converted)) => {
                    if was_converted {
                        info!(id = %disc.id, "converted");
                        converted.push(disc.id.clone());
                    } else {
                        info!(id = %disc.id, "passed through unchanged");
                        passed_through.push(disc.id.clone());
                    }
                    entries.push(entry);
                }
                Err(e) => {
                    warn!(id = %disc.id, error = %e, "conversion failed; document skipped");
                    failed.push(FailureEntry {
                        id: disc.id.clone(),
                        path: disc.path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if entries.is_empty() {
            return Err(PipelineError::NothingProcessed(format!(
                "all {} discovered documents failed",
                discovered.len()
            )));
        }

        // Index rebuild runs only after every conversion has settled.
        let index_path = self.write_index(&entries)?;

        Ok(ConvertReport {
            converted,
            passed_through,
            failed,
            duplicates,
            index_path,
        })
    }

    /// Validate every discovered document without writing anything.
    pub fn validate_all(&self) -> Result<ValidateReport, PipelineError> {
        let (discovered, _) = self.discover()?;
        let mut diagnostics = Vec::new();
        let mut checked = 0usize;

        for disc in &discovered {
            match self.load_document(disc) {
                Ok((doc, _)) => {
                    checked += 1;
                    diagnostics.extend(validate(&doc));
                }
                Err(e) => {
                    checked += 1;
                    diagnostics.push(Diagnostic {
                        document: disc.id.clone(),
                        check: "load".to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        if checked == 0 {
            return Err(PipelineError::NothingProcessed(
                "no documents found to validate".to_string(),
            ));
        }
        Ok(ValidateReport {
            documents_checked: checked,
            diagnostics,
        })
    }

    /// Rebuild the index from the current corpus without converting.
    pub fn rebuild_index_only(&self) -> Result<IndexReport, PipelineError> {
        let (discovered, duplicates) = self.discover()?;
        let mut entries = Vec::new();

        for disc in &discovered {
            match self.load_document(disc) {
                Ok((doc, _)) => entries.push(IndexEntry::from_document(&doc)),
                Err(e) => {
                    warn!(id = %disc.id, error = %e, "unreadable document left out of index rebuild");
                }
            }
        }

        if entries.is_empty() {
            return Err(PipelineError::NothingProcessed(
                "no documents available for the index".to_string(),
            ));
        }
        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| PipelineError::io(&self.config.output_dir, e))?;
        let index_path = self.write_index(&entries)?;
        Ok(IndexReport {
            entries: entries.len(),
            index_path,
            duplicates,
        })
    }

    /// Run the conversion chain over one in-memory sample document and
    /// report pass/fail per stage. No filesystem access.
    pub fn smoke_test(&self) -> SmokeReport {
        const SAMPLE: &str = "---\nname: smoke-sample\ndescription: Sample agent for the smoke test\ntools: Read, Write, Edit, MultiEdit, Bash, Glob, Grep\n---\n## Persona\n\nExercises every pipeline stage.\n";
        let mut checks: Vec<(String, bool)> = Vec::new();

        let doc = match AgentDocument::parse(
            "smoke-sample".to_string(),
            PathBuf::from("smoke-sample.md"),
            SAMPLE,
        ) {
            Ok(doc) => {
                checks.push(("parse".to_string(), true));
                doc
            }
            Err(_) => {
                checks.push(("parse".to_string(), false));
                return SmokeReport { checks };
            }
        };

        let source = match &doc.metadata {
            Metadata::Source(meta) => {
                checks.push(("source metadata shape".to_string(), true));
                meta.clone()
            }
            _ => {
                checks.push(("source metadata shape".to_string(), false));
                return SmokeReport { checks };
            }
        };

        let partial = match map_tools(&source.tools) {
            Ok(partial) => {
                // Seven tools, six capabilities: Edit and MultiEdit collapse.
                checks.push(("tool mapping".to_string(), partial.len() == 6));
                partial
            }
            Err(_) => {
                checks.push(("tool mapping".to_string(), false));
                return SmokeReport { checks };
            }
        };

        let metadata = self
            .config
            .policy
            .apply_defaults(&source.description, partial);
        checks.push((
            "policy defaults are total".to_string(),
            metadata.capabilities.len() == 11,
        ));

        let first = emitter::emit(&metadata, &doc.body);
        let second = emitter::emit(&metadata, &doc.body);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                checks.push(("emission is byte-stable".to_string(), a == b));
                match AgentDocument::parse(doc.id.clone(), doc.path.clone(), &a) {
                    Ok(emitted) => {
                        checks.push((
                            "emitted document validates".to_string(),
                            validate(&emitted).is_empty(),
                        ));
                        checks.push((
                            "body preserved verbatim".to_string(),
                            emitted.body == doc.body,
                        ));
                    }
                    Err(_) => {
                        checks.push(("emitted document validates".to_string(), false));
                    }
                }
            }
            _ => {
                checks.push(("emission is byte-stable".to_string(), false));
            }
        }

        SmokeReport { checks }
    }

    fn load_document(
        &self,
        disc: &DiscoveredDocument,
    ) -> Result<(AgentDocument, String), PipelineError> {
        let raw = std::fs::read_to_string(&disc.path)
            .map_err(|e| PipelineError::io(&disc.path, e))?;
        let doc = AgentDocument::parse(disc.id.clone(), disc.path.clone(), &raw)?;
        Ok((doc, raw))
    }

    /// Convert one document. Source metadata is remapped and re-emitted;
    /// narrative and already-target documents pass through byte-identical.
    /// Emitting to an existing id overwrites, never duplicates.
    fn convert_one(
        &self,
        disc: &DiscoveredDocument,
    ) -> Result<(IndexEntry, bool), PipelineError> {
        let (doc, raw) = self.load_document(disc)?;
        let out_path = self.config.output_dir.join(format!("{}.md", disc.id));

        let was_converted = match &doc.metadata {
            Metadata::Source(source) => {
                let partial = map_tools(&source.tools)?;
                let metadata = self
                    .config
                    .policy
                    .apply_defaults(&source.description, partial);
                let text = emitter::emit(&metadata, &doc.body)?;
                std::fs::write(&out_path, text).map_err(|e| PipelineError::io(&out_path, e))?;
                true
            }
            Metadata::Target(_) | Metadata::Narrative => {
                std::fs::write(&out_path, raw).map_err(|e| PipelineError::io(&out_path, e))?;
                false
            }
        };

        Ok((IndexEntry::from_document(&doc), was_converted))
    }

    fn write_index(&self, entries: &[IndexEntry]) -> Result<PathBuf, PipelineError> {
        let index_path = self.config.index_path();
        let text = build_index(entries);
        std::fs::write(&index_path, text).map_err(|e| PipelineError::io(&index_path, e))?;
        info!(path = %index_path.display(), entries = entries.len(), "index rebuilt");
        Ok(index_path)
    }
}

fn is_hidden(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}
