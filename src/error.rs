//! Pipeline error types.
//!
//! One crate-wide error enum; per-document failures are caught at the driver
//! boundary and surfaced in run reports rather than aborting the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the conversion and indexing pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Front-matter start marker present without a matching end marker,
    /// or a metadata block that cannot be interpreted.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A declared source tool is not part of the known vocabulary.
    /// Never dropped silently; a declared capability must round-trip.
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    /// Configuration loading or validation failure.
    #[error("config error: {0}")]
    ConfigError(String),

    /// Read or write failure for one document.
    #[error("I/O failure for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The driver could not process a single document in the invocation.
    #[error("no documents could be processed: {0}")]
    NothingProcessed(String),
}

impl PipelineError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
