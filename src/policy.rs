//! Conversion policy: target fields with no source equivalent.
//!
//! The policy is the single place corpus-wide defaults live; mapping logic
//! never carries inline literals for them. It is serde-configurable so the
//! config layer can override it per deployment.

use crate::schema::target::{Capability, ExecutionMode, TargetMetadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Corpus-wide conversion defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPolicy {
    /// Execution mode for every converted agent.
    #[serde(default)]
    pub mode: ExecutionMode,

    /// Sampling temperature for every converted agent.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Capabilities forced to `false` regardless of what the source
    /// declares; these have no meaning for this corpus.
    #[serde(default = "default_disabled")]
    pub disabled: Vec<Capability>,
}

fn default_temperature() -> f64 {
    0.3
}

fn default_disabled() -> Vec<Capability> {
    vec![
        Capability::Todowrite,
        Capability::Todoread,
        Capability::List,
        Capability::Patch,
    ]
}

impl Default for ConversionPolicy {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            temperature: default_temperature(),
            disabled: default_disabled(),
        }
    }
}

impl ConversionPolicy {
    /// Complete a partial capability map into full target metadata.
    ///
    /// Total over the capability set: whatever subset the mapper produced,
    /// the output carries all eleven names with explicit booleans. Disabled
    /// capabilities are forced off last, so the policy wins over the source.
    pub fn apply_defaults(
        &self,
        description: &str,
        partial: BTreeMap<Capability, bool>,
    ) -> TargetMetadata {
        let mut capabilities = partial;
        for cap in Capability::ALL {
            capabilities.entry(cap).or_insert(false);
        }
        for cap in &self.disabled {
            capabilities.insert(*cap, false);
        }
        TargetMetadata {
            description: description.to_string(),
            mode: self.mode,
            temperature: self.temperature,
            capabilities,
        }
    }
}
