//! Pipeline configuration and layered loading.
//!
//! Precedence, lowest to highest: built-in defaults, `recast.toml` in the
//! workspace root, then `RECAST__`-prefixed environment variables.

use crate::error::PipelineError;
use crate::logging::LoggingConfig;
use crate::policy::ConversionPolicy;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional workspace config file.
pub const CONFIG_FILE_NAME: &str = "recast.toml";

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory scanned for source agent documents (workspace-relative
    /// unless absolute).
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory converted documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Index file name, written inside the output directory.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Corpus-wide conversion defaults.
    #[serde(default)]
    pub policy: ConversionPolicy,

    /// Logging section.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("agents")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("converted")
}

fn default_index_file() -> String {
    "README.md".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            index_file: default_index_file(),
            policy: ConversionPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Anchor relative directories at the workspace root.
    pub fn resolve(&mut self, workspace_root: &Path) {
        if self.source_dir.is_relative() {
            self.source_dir = workspace_root.join(&self.source_dir);
        }
        if self.output_dir.is_relative() {
            self.output_dir = workspace_root.join(&self.output_dir);
        }
    }

    /// Where the regenerated index is written.
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(&self.index_file)
    }
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, optional
    /// `recast.toml`, then environment.
    pub fn load(workspace_root: &Path) -> Result<PipelineConfig, PipelineError> {
        let file = workspace_root.join(CONFIG_FILE_NAME);
        let builder = Self::base_builder()?
            .add_source(File::from(file).required(false))
            .add_source(Self::environment());
        let mut config: PipelineConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| PipelineError::ConfigError(e.to_string()))?;
        config.resolve(workspace_root);
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path, workspace_root: &Path) -> Result<PipelineConfig, PipelineError> {
        let builder = Self::base_builder()?
            .add_source(File::from(path.to_path_buf()))
            .add_source(Self::environment());
        let mut config: PipelineConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| PipelineError::ConfigError(e.to_string()))?;
        config.resolve(workspace_root);
        Ok(config)
    }

    fn base_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, PipelineError>
    {
        let defaults = Config::try_from(&PipelineConfig::default())
            .map_err(|e| PipelineError::ConfigError(e.to_string()))?;
        Ok(Config::builder().add_source(defaults))
    }

    fn environment() -> Environment {
        Environment::with_prefix("RECAST")
            .separator("__")
            .try_parsing(true)
    }
}
