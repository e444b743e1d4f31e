//! CLI Tooling
//!
//! Command-line interface for the conversion pipeline. Provides
//! workspace-scoped commands with idempotent execution.

use crate::config::{ConfigLoader, PipelineConfig};
use crate::error::PipelineError;
use crate::format::{
    format_convert_report_text, format_index_report_text, format_smoke_report_text,
    format_validate_report_text,
};
use crate::logging::LoggingConfig;
use crate::pipeline::Pipeline;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Recast CLI - Agent document conversion and indexing
#[derive(Parser)]
#[command(name = "recast")]
#[command(about = "Convert agent documents to the target schema and rebuild the index")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert all source documents and rebuild the index
    Convert {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate all documents without writing anything
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Rebuild the index from the current corpus without converting
    Index {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run the built-in end-to-end smoke test
    Smoke {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Cli {
    /// Fold CLI logging flags onto a loaded logging config. CLI wins over
    /// env and file.
    pub fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

/// Result of one command execution: the text to print plus whether the
/// process should exit zero.
#[derive(Debug)]
pub struct CommandOutcome {
    pub text: String,
    pub success: bool,
}

impl CommandOutcome {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Workspace-scoped command dispatcher.
pub struct CliContext {
    pipeline: Pipeline,
}

impl CliContext {
    /// Create a new CLI context, loading configuration for the workspace.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, PipelineError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path, &workspace_root)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self {
            pipeline: Pipeline::new(config),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    /// Execute a command against the workspace.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutcome, PipelineError> {
        match command {
            Commands::Convert { format } => {
                // Per-document failures are isolated: they are named in the
                // report, and the command still exits zero as long as at
                // least one document was processed.
                let report = self.pipeline.convert_all()?;
                let text = match format.as_str() {
                    "json" => to_json(&report)?,
                    _ => format_convert_report_text(&report),
                };
                Ok(CommandOutcome::ok(text))
            }
            Commands::Validate { format } => {
                let report = self.pipeline.validate_all()?;
                let text = match format.as_str() {
                    "json" => to_json(&report)?,
                    _ => format_validate_report_text(&report),
                };
                Ok(CommandOutcome {
                    text,
                    success: report.is_clean(),
                })
            }
            Commands::Index { format } => {
                let report = self.pipeline.rebuild_index_only()?;
                let text = match format.as_str() {
                    "json" => to_json(&report)?,
                    _ => format_index_report_text(&report),
                };
                Ok(CommandOutcome::ok(text))
            }
            Commands::Smoke { format } => {
                let report = self.pipeline.smoke_test();
                let text = match format.as_str() {
                    "json" => to_json(&report)?,
                    _ => format_smoke_report_text(&report),
                };
                Ok(CommandOutcome {
                    text,
                    success: report.passed(),
                })
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PipelineError::ConfigError(format!("json serialization failed: {}", e)))
}
