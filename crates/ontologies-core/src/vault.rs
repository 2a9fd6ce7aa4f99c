//! Vault layout: root path, skip list, and deterministic directory listings.

use crate::error::{OntologyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Options controlling which parts of a vault are visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultOptions {
    /// File suffix that marks a page (including the dot).
    pub markdown_extension: String,
    /// Directory names to skip at any depth (exact basename match).
    pub skip_dirs: Vec<String>,
}

impl Default for VaultOptions {
    fn default() -> Self {
        Self {
            markdown_extension: ".md".to_string(),
            skip_dirs: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                ".obsidian".to_string(),
            ],
        }
    }
}

/// One child of a listed directory.
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    /// Real directory (symlinks are not followed).
    pub is_dir: bool,
}

/// A note vault rooted at a directory.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    markdown_extension: String,
    skip_dirs: BTreeSet<String>,
}

impl Vault {
    pub fn open(root: impl Into<PathBuf>, options: &VaultOptions) -> Self {
        Self {
            root: root.into(),
            markdown_extension: options.markdown_extension.clone(),
            skip_dirs: options.skip_dirs.iter().cloned().collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn markdown_extension(&self) -> &str {
        &self.markdown_extension
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_dirs.contains(name)
    }

    /// Whether the directory at `path` is excluded by its own basename.
    pub fn is_skipped_dir(&self, path: &Path) -> bool {
        self.is_skipped(&chapter_title(path))
    }

    pub fn is_markdown(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.markdown_extension)
    }

    /// Page concept for a Markdown file name: everything before the first
    /// occurrence of the extension (`"notes.md"` → `"notes"`).
    pub fn page_name<'a>(&self, file_name: &'a str) -> &'a str {
        file_name
            .split(self.markdown_extension.as_str())
            .next()
            .unwrap_or(file_name)
    }

    /// Children of `dir`, sorted by name (byte order).
    pub fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let read = std::fs::read_dir(dir).map_err(|e| OntologyError::io(dir, e))?;

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| OntologyError::io(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| OntologyError::io(&path, e))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path,
                is_dir: file_type.is_dir(),
            });
        }

        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(entries)
    }

    /// Read a page's full text. Invalid UTF-8 is replaced with U+FFFD; read
    /// failures are fatal to the run.
    pub fn read_page(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| OntologyError::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Concept name of a directory: its basename, or the path as written when it
/// has none (e.g. `.` or `/`).
pub fn chapter_title(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
