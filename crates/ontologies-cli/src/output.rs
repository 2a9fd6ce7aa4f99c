//! Output file lifecycle and graph export.

use anyhow::{Context, Result};
use ontologies_core::{chain_roots, ChainOptions, Concept, MentionIndex, PrimaryRelations, Relationship, ScanContext};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

/// Remove any previous output, create it empty, and reopen it for appending.
pub fn open_output(path: &Path) -> Result<BufWriter<File>> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove previous output {}", path.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {} for appending", path.display()))?;
    Ok(BufWriter::new(file))
}

/// The derived concept graph, as written by `--graph-out`.
#[derive(Debug, Serialize)]
pub struct GraphExport<'a> {
    pub primary_relations: &'a PrimaryRelations,
    pub edges: &'a [Relationship],
    /// Concepts that have at least one sub-ontology chain.
    pub chain_roots: Vec<Concept>,
    pub mentions: &'a MentionIndex,
}

impl<'a> GraphExport<'a> {
    pub fn new(
        primary_relations: &'a PrimaryRelations,
        scan: &'a ScanContext,
        chain_options: &ChainOptions,
    ) -> Self {
        Self {
            primary_relations,
            edges: &scan.edges,
            chain_roots: chain_roots(&scan.edges, primary_relations, chain_options),
            mentions: &scan.mentions,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
