//! Table of contents and primary (directory-derived) relations.
//!
//! A directory-only pre-order walk. Every visited subdirectory contributes one
//! node to the tree and one `(containing directory, subdirectory)` edge,
//! whether or not it holds any Markdown.

use crate::error::Result;
use crate::model::{PrimaryRelations, Relationship};
use crate::vault::{chapter_title, Vault};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A directory and its visited subdirectories, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    pub name: String,
    pub children: Vec<TocNode>,
}

impl TocNode {
    /// Depth-first count of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableOfContents {
    /// `None` when the root itself is on the skip list.
    pub root: Option<TocNode>,
    pub primary_relations: PrimaryRelations,
}

pub fn build_table_of_contents(vault: &Vault) -> Result<TableOfContents> {
    let mut primary_relations = PrimaryRelations::new();
    let root = visit(vault, vault.root(), &mut primary_relations)?;

    if let Some(node) = &root {
        tracing::debug!(
            directories = node.descendant_count(),
            primary_relations = primary_relations.len(),
            "built table of contents"
        );
    }

    Ok(TableOfContents {
        root,
        primary_relations,
    })
}

fn visit(vault: &Vault, dir: &Path, primaries: &mut PrimaryRelations) -> Result<Option<TocNode>> {
    if vault.is_skipped_dir(dir) {
        return Ok(None);
    }

    let title = chapter_title(dir);
    let mut children = Vec::new();

    for entry in vault.list_dir(dir)? {
        if !entry.is_dir || vault.is_skipped(&entry.name) {
            continue;
        }

        primaries.push(Relationship::new(title.clone(), entry.name.clone()));
        if let Some(child) = visit(vault, &entry.path, primaries)? {
            children.push(child);
        }
    }

    Ok(Some(TocNode {
        name: title,
        children,
    }))
}
