//! Recast: Agent Document Conversion and Indexing
//!
//! Converts agent markdown documents from a source front-matter schema to a
//! fixed target schema, validates the corpus, and maintains a categorized
//! index. Document bodies are preserved byte-for-byte and every run is
//! deterministic and idempotent.

pub mod config;
pub mod document;
pub mod emitter;
pub mod error;
pub mod format;
pub mod index;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod policy;
pub mod schema;
pub mod tooling;
pub mod validator;

pub use document::{AgentDocument, Metadata};
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use schema::{Capability, TargetMetadata};
