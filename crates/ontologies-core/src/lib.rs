//! Ontology derivation for Markdown note vaults
//!
//! Walks a directory of interlinked notes and derives two kinds of
//! parent/child concept edges:
//! - **Primary relations**: directory → immediate subdirectory (see [`toc`])
//! - **Mention relations**: page → `[[Referenced]]` concept (see [`scan`])
//!
//! The mention edges (minus the primary ones) feed the bounded-depth chain
//! enumeration in [`chains`], which yields the "sub-ontologies" of a page.
//!
//! All accumulated state is explicit: the scanner returns a [`ScanContext`],
//! the table-of-contents pass returns [`PrimaryRelations`], and both are
//! handed by reference to whoever renders or exports them.

pub mod chains;
pub mod error;
pub mod model;
pub mod scan;
pub mod toc;
pub mod vault;

pub use chains::{chain_roots, dedup_rendered, generate_sub_ontologies, ChainOptions, MAX_DEPTH};
pub use error::{OntologyError, Result};
pub use model::*;
pub use scan::{extract_references, index_page, reference_regex, scan_mentions, ReferenceMatch, ScanOptions, SnippetAnchor};
pub use toc::{build_table_of_contents, TableOfContents, TocNode};
pub use vault::{chapter_title, DirEntry, Vault, VaultOptions};
