//! Run configuration: defaults, optional JSON file, command-line overrides.

use anyhow::{Context, Result};
use ontologies_core::{ChainOptions, ScanOptions, VaultOptions};
use ontologies_render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologiesConfig {
    pub vault: VaultOptions,
    pub scan: ScanOptions,
    pub chains: ChainOptions,
    pub render: RenderOptions,
}

impl OntologiesConfig {
    /// Defaults, or the given JSON file layered over them.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: OntologiesConfig = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }
}
