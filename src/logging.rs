//! Structured logging via the `tracing` crate.
//!
//! Level, format, and destination are configurable from the config file,
//! environment variables (RECAST_LOG, RECAST_LOG_FORMAT, RECAST_LOG_OUTPUT,
//! RECAST_LOG_FILE), and CLI flags; CLI wins over env, env over file.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is file; None means the platform default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format, terminal destinations only)
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_color(),
        }
    }
}

/// Resolve the log file path: explicit config, RECAST_LOG_FILE env, then
/// the platform state directory via `directories`.
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf, PipelineError> {
    if let Ok(env_path) = std::env::var("RECAST_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    let project_dirs = directories::ProjectDirs::from("", "recast", "recast").ok_or_else(|| {
        PipelineError::ConfigError(
            "could not determine platform state directory for log file".to_string(),
        )
    })?;
    let state_dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_dir());
    Ok(state_dir.join("recast.log"))
}

/// Initialize the global tracing subscriber from config.
pub fn init_logging(config: &LoggingConfig) -> Result<(), PipelineError> {
    let filter = build_env_filter(config);
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let (writer, ansi) = match output.as_str() {
        "stdout" => (BoxMakeWriter::new(std::io::stdout), config.color),
        "stderr" => (BoxMakeWriter::new(std::io::stderr), config.color),
        "file" => {
            let path = resolve_log_file_path(config.file.clone())?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| PipelineError::io(&path, e))?;
            (BoxMakeWriter::new(file), false)
        }
        other => {
            return Err(PipelineError::ConfigError(format!(
                "invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
                other
            )))
        }
    };

    let base = Registry::default().with(filter);
    if format == "json" {
        base.with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(writer),
        )
        .init();
    } else {
        base.with(
            fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .init();
    }

    Ok(())
}

/// RECAST_LOG env filter wins over the configured level.
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env("RECAST_LOG").unwrap_or_else(|_| EnvFilter::new(&config.level))
}

fn determine_format(config: &LoggingConfig) -> Result<String, PipelineError> {
    if let Ok(format) = std::env::var("RECAST_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }
    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(PipelineError::ConfigError(format!(
            "invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn determine_output(config: &LoggingConfig) -> Result<String, PipelineError> {
    if let Ok(output) = std::env::var("RECAST_LOG_OUTPUT") {
        if !output.is_empty() {
            return Ok(output);
        }
    }
    Ok(config.output.clone())
}
