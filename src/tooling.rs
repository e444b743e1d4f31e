//! Tooling & Integration Layer
//!
//! CLI entry points for running the pipeline from scripts and CI. Every
//! command is workspace-scoped and idempotent.

pub mod cli;

pub use cli::{Cli, CliContext, CommandOutcome, Commands};
