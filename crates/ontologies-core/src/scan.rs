//! Mention scanning: `[[Concept]]` cross-references → edges + backlinks.
//!
//! One pass over every Markdown page in the vault. Each occurrence of a
//! double-bracket token yields, in left-to-right order:
//! - an edge `page → Concept` (duplicates kept), and
//! - a backlink record under `Concept` with a ±radius character snippet.

use crate::error::Result;
use crate::model::{MentionRecord, Relationship, ScanContext};
use crate::vault::Vault;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Characters of context kept on each side of a mention.
pub const SNIPPET_RADIUS: usize = 100;

/// Where a mention's snippet window is centred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetAnchor {
    /// First occurrence of the exact bracketed token in the page, so repeated
    /// mentions of the same concept all share one snippet.
    #[default]
    FirstOccurrence,
    /// The occurrence actually being recorded.
    Occurrence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub snippet_radius: usize,
    pub snippet_anchor: SnippetAnchor,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            snippet_radius: SNIPPET_RADIUS,
            snippet_anchor: SnippetAnchor::default(),
        }
    }
}

/// One `[[...]]` occurrence in raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceMatch<'a> {
    /// Full bracketed token, e.g. `[[Foo]]`.
    pub token: &'a str,
    /// Inner text, verbatim (no trimming, no case folding).
    pub name: &'a str,
    /// Byte offset of `token` in the text.
    pub start: usize,
}

/// The cross-reference pattern: `[[`, shortest inner text, `]]`.
///
/// The inner text never spans a line terminator (`\n`, `\r`, U+2028, U+2029).
pub fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\[([^\n\r\x{2028}\x{2029}]*?)\]\]").expect("static regex")
    })
}

/// All cross-reference tokens in `text`, left to right.
pub fn extract_references(text: &str) -> Vec<ReferenceMatch<'_>> {
    reference_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let token = caps.get(0)?;
            let name = caps.get(1)?;
            Some(ReferenceMatch {
                token: token.as_str(),
                name: name.as_str(),
                start: token.start(),
            })
        })
        .collect()
}

/// Scan every page under the vault root.
pub fn scan_mentions(vault: &Vault, options: &ScanOptions) -> Result<ScanContext> {
    let mut ctx = ScanContext::default();

    // The root is matched by basename too, even when given as e.g. `notes/`.
    if vault.is_skipped_dir(vault.root()) {
        return Ok(ctx);
    }

    let walker = WalkDir::new(vault.root())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !vault.is_skipped(name.as_ref())
        });

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !vault.is_markdown(&file_name) {
            continue;
        }

        let page = vault.page_name(&file_name);
        let text = vault.read_page(entry.path())?;
        let before = ctx.edges.len();
        index_page(&mut ctx, page, &text, options);
        ctx.pages_scanned += 1;

        tracing::debug!(
            page,
            mentions = ctx.edges.len() - before,
            "scanned page"
        );
    }

    tracing::info!(
        pages = ctx.pages_scanned,
        edges = ctx.edges.len(),
        targets = ctx.mentions.targets().count(),
        "mention scan complete"
    );

    Ok(ctx)
}

/// Record every mention in one page's raw text.
pub fn index_page(ctx: &mut ScanContext, page: &str, text: &str, options: &ScanOptions) {
    for reference in extract_references(text) {
        ctx.edges.push(Relationship::new(page, reference.name));

        let anchor = match options.snippet_anchor {
            SnippetAnchor::FirstOccurrence => text.find(reference.token).unwrap_or(reference.start),
            SnippetAnchor::Occurrence => reference.start,
        };
        let snippet = char_window(text, anchor, options.snippet_radius);

        ctx.mentions.record(
            reference.name,
            MentionRecord {
                source: page.to_string(),
                snippet: snippet.to_string(),
            },
        );
    }
}

/// `radius` characters either side of byte offset `anchor`, clamped to the
/// text and cut on character boundaries.
fn char_window(text: &str, anchor: usize, radius: usize) -> &str {
    let start = text[..anchor]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(anchor);
    let end = text[anchor..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| anchor + i)
        .unwrap_or(text.len());
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OntologyError;
    use crate::vault::VaultOptions;
    use std::fs;
    use tempfile::tempdir;

    fn scan_text(page: &str, text: &str, options: &ScanOptions) -> ScanContext {
        let mut ctx = ScanContext::default();
        index_page(&mut ctx, page, text, options);
        ctx
    }

    #[test]
    fn test_extract_references_is_non_greedy() {
        let refs = extract_references("see [[A]] and [[B c]] then [[]]");
        let names: Vec<&str> = refs.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B c", ""]);
        assert_eq!(refs[0].token, "[[A]]");
        assert_eq!(refs[0].start, 4);
    }

    #[test]
    fn test_reference_names_are_verbatim() {
        let refs = extract_references("[[ Spaced ]] [[lower]]");
        assert_eq!(refs[0].name, " Spaced ");
        assert_eq!(refs[1].name, "lower");
    }

    #[test]
    fn test_single_mention_records_edge_and_backlink() {
        let ctx = scan_text("X", "before [[Y]] after", &ScanOptions::default());

        assert_eq!(ctx.edges, vec![Relationship::new("X", "Y")]);
        let mentions = ctx.mentions.mentions_of("Y");
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].source, "X");
        assert_eq!(mentions[0].snippet, "before [[Y]] after");
    }

    #[test]
    fn test_repeated_mentions_share_first_occurrence_snippet() {
        let text = format!("[[Foo]]{}[[Foo]] tail", "x".repeat(300));
        let ctx = scan_text("page", &text, &ScanOptions::default());

        assert_eq!(
            ctx.edges,
            vec![Relationship::new("page", "Foo"), Relationship::new("page", "Foo")]
        );
        let mentions = ctx.mentions.mentions_of("Foo");
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].snippet, mentions[1].snippet);
        assert!(mentions[0].snippet.starts_with("[[Foo]]"));
        assert_eq!(mentions[0].snippet.chars().count(), 100);
    }

    #[test]
    fn test_per_occurrence_anchor_tracks_each_mention() {
        let text = format!("[[Foo]]{}[[Foo]] tail", "x".repeat(300));
        let options = ScanOptions {
            snippet_anchor: SnippetAnchor::Occurrence,
            ..ScanOptions::default()
        };
        let ctx = scan_text("page", &text, &options);

        let mentions = ctx.mentions.mentions_of("Foo");
        assert_ne!(mentions[0].snippet, mentions[1].snippet);
        assert!(mentions[1].snippet.ends_with("[[Foo]] tail"));
    }

    #[test]
    fn test_snippet_window_is_clamped_and_char_safe() {
        let text = format!("{}[[Ü]]{}", "é".repeat(150), "ß".repeat(150));
        let ctx = scan_text("p", &text, &ScanOptions::default());
        let snippet = &ctx.mentions.mentions_of("Ü")[0].snippet;

        assert_eq!(snippet.chars().count(), 200);
        assert!(snippet.starts_with(&"é".repeat(100)));
        assert!(snippet.ends_with(&"ß".repeat(95)));
    }

    #[test]
    fn test_mentions_follow_left_to_right_order() {
        let ctx = scan_text("p", "[[B]] [[A]] [[B]]", &ScanOptions::default());
        let children: Vec<&str> = ctx.edges.iter().map(|e| e.child_aspect.as_str()).collect();
        assert_eq!(children, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_references_do_not_span_line_terminators() {
        for text in ["[[a\nb]]", "[[a\rb]]", "[[a\u{2028}b]]", "[[a\u{2029}b]]"] {
            assert!(extract_references(text).is_empty(), "{text:?}");
        }
        let refs = extract_references("[[a\r\n[[b]]");
        let names: Vec<&str> = refs.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn test_scan_keeps_pages_with_invalid_utf8() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Good.md"), "[[A]]").unwrap();
        fs::write(dir.path().join("Latin1.md"), b"caf\xe9 [[B]]").unwrap();

        let vault = Vault::open(dir.path(), &VaultOptions::default());
        let ctx = scan_mentions(&vault, &ScanOptions::default()).unwrap();

        assert_eq!(
            ctx.edges,
            vec![Relationship::new("Good", "A"), Relationship::new("Latin1", "B")]
        );
        assert_eq!(ctx.pages_scanned, 2);
        assert_eq!(ctx.mentions.mentions_of("B")[0].snippet, "caf\u{FFFD} [[B]]");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_page_aborts_scan() {
        let dir = tempdir().unwrap();
        let notes = dir.path().join("notes");
        let real = dir.path().join("real");
        fs::create_dir_all(&notes).unwrap();
        fs::create_dir_all(&real).unwrap();
        fs::write(notes.join("a.md"), "[[A]]").unwrap();
        std::os::unix::fs::symlink(&real, notes.join("x.md")).unwrap();

        let vault = Vault::open(&notes, &VaultOptions::default());
        let err = scan_mentions(&vault, &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, OntologyError::Io { .. }));
    }
}
