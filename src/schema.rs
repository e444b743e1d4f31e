//! Source and target metadata schemas and the mapping between them.

pub mod mapping;
pub mod source;
pub mod target;

pub use mapping::{map_tools, SourceTool};
pub use source::SourceMetadata;
pub use target::{Capability, ExecutionMode, RawTargetMetadata, TargetMetadata};
