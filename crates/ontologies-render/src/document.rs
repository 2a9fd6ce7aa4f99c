//! The accumulated HTML document: head, table of contents, pages.

use crate::error::Result;
use crate::links::{escape_html, link_references};
use crate::markdown::markdown_to_html;
use ontologies_core::vault::chapter_title;
use ontologies_core::{
    dedup_rendered, generate_sub_ontologies, ChainOptions, MentionRecord, PrimaryRelations,
    ScanContext, TableOfContents, TocNode, Vault,
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Fixed document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub title: String,
    pub author: String,
    /// Stylesheet href, relative to the output file.
    pub stylesheet: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Ontologies".to_string(),
            author: "Richard Anaya II".to_string(),
            stylesheet: "./ontology.css".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    pub directories: usize,
    pub pages: usize,
    pub mentions_rendered: usize,
    pub chains_rendered: usize,
}

/// Appends document fragments to `out` in emission order.
pub struct DocumentRenderer<'a, W: Write> {
    vault: &'a Vault,
    scan: &'a ScanContext,
    primaries: &'a PrimaryRelations,
    options: &'a RenderOptions,
    chain_options: ChainOptions,
    out: W,
    stats: RenderStats,
}

impl<'a, W: Write> DocumentRenderer<'a, W> {
    pub fn new(
        vault: &'a Vault,
        scan: &'a ScanContext,
        primaries: &'a PrimaryRelations,
        options: &'a RenderOptions,
        chain_options: ChainOptions,
        out: W,
    ) -> Self {
        Self {
            vault,
            scan,
            primaries,
            options,
            chain_options,
            out,
            stats: RenderStats::default(),
        }
    }

    pub fn write_head(&mut self) -> Result<()> {
        let RenderOptions {
            title,
            author,
            stylesheet,
        } = self.options;
        write!(
            self.out,
            r#"
<!DOCTYPE html>
<html>
  <head>
    <title>{title}</title>
    <link rel="stylesheet" href="{stylesheet}">
  </head>
  <body>
    <h1>{title}</h1>
    <h4>By {author}</h4>
    <hr/>
    <h1>Table of Contents</h1>
    <hr/>
"#
        )?;
        Ok(())
    }

    /// One indented block per directory, linking each subdirectory.
    pub fn write_table_of_contents(&mut self, toc: &TableOfContents) -> Result<()> {
        if let Some(root) = &toc.root {
            let mut html = String::new();
            toc_block(root, &mut html);
            self.out.write_all(html.as_bytes())?;
        }
        self.out.write_all(b"<h1>Pages</h1><hr/>")?;
        Ok(())
    }

    /// Render every directory and page under the vault root.
    pub fn write_pages(&mut self) -> Result<()> {
        let root = self.vault.root().to_path_buf();
        self.write_directory(&root)
    }

    pub fn finish(mut self) -> Result<(W, RenderStats)> {
        self.out.write_all(b"\n  </body>\n</html>\n")?;
        self.out.flush()?;
        Ok((self.out, self.stats))
    }

    fn write_directory(&mut self, dir: &Path) -> Result<()> {
        if self.vault.is_skipped_dir(dir) {
            return Ok(());
        }

        let title = chapter_title(dir);
        write!(self.out, r#"<h2 id="{title}">{title}</h2><hr>"#)?;
        self.stats.directories += 1;

        let index_file = format!("{}{}", title, self.vault.markdown_extension());
        let mut index_pages = Vec::new();
        let mut other_pages = Vec::new();
        let mut directories = Vec::new();

        for entry in self.vault.list_dir(dir)? {
            if entry.is_dir {
                directories.push(entry);
            } else if self.vault.is_markdown(&entry.name) {
                if entry.name == index_file {
                    index_pages.push(entry);
                } else {
                    other_pages.push(entry);
                }
            }
        }

        for entry in index_pages.iter().chain(&other_pages) {
            let markdown = self.vault.read_page(&entry.path)?;
            let is_index = entry.name == index_file;
            self.write_page(&entry.name, &markdown, is_index)?;
        }

        for entry in directories {
            self.write_directory(&entry.path)?;
        }

        Ok(())
    }

    fn write_page(&mut self, file_name: &str, markdown: &str, is_index: bool) -> Result<()> {
        let page = self.vault.page_name(file_name);
        let mentions = self.scan.mentions.mentions_of(page);

        let mut body = markdown_to_html(markdown);
        if !mentions.is_empty() {
            body.push_str(&mentions_list(mentions));
        }
        let wrapped = format!(r#"<span id="{file_name}">{body}</span>"#);
        let linked = link_references(&wrapped);

        if is_index {
            self.out.write_all(linked.as_bytes())?;
        } else {
            write!(self.out, r#"<h3 id="{page}">{page}</h3>{linked}"#)?;
        }

        let chains = generate_sub_ontologies(&self.scan.edges, self.primaries, page, &self.chain_options);
        let rendered = dedup_rendered(&chains);
        if !rendered.is_empty() {
            write!(
                self.out,
                r#"<h4>Sub Ontologies for {page}</h4><ul class="sub-ontologies">"#
            )?;
            for chain in &rendered {
                write!(self.out, "<li>{chain}</li>")?;
            }
            self.out.write_all(b"</ul>")?;
        }

        tracing::debug!(
            page,
            mentions = mentions.len(),
            chains = rendered.len(),
            "rendered page"
        );

        self.stats.pages += 1;
        self.stats.mentions_rendered += mentions.len();
        self.stats.chains_rendered += rendered.len();
        Ok(())
    }
}

fn toc_block(node: &TocNode, html: &mut String) {
    html.push_str(r#"<div style="margin-left: 1rem">"#);
    for child in &node.children {
        html.push_str(&format!(r##"<a href="#{0}">{0}</a><br>"##, child.name));
        toc_block(child, html);
    }
    html.push_str("</div>");
}

fn mentions_list(mentions: &[MentionRecord]) -> String {
    let mut html = String::from(r#"<h4>Mentions</h4><ul class="mentions">"#);
    for mention in mentions {
        html.push_str(&format!(
            r##"<li><a href="#{0}"><b>{0}</b></a> - "{1}"</li>"##,
            mention.source,
            escape_html(&mention.snippet)
        ));
    }
    html.push_str("</ul>");
    html
}

/// Write the whole document (head, table of contents, pages) to `out`.
pub fn render_document<W: Write>(
    vault: &Vault,
    toc: &TableOfContents,
    scan: &ScanContext,
    options: &RenderOptions,
    chain_options: ChainOptions,
    out: W,
) -> Result<(W, RenderStats)> {
    let mut renderer = DocumentRenderer::new(
        vault,
        scan,
        &toc.primary_relations,
        options,
        chain_options,
        out,
    );
    renderer.write_head()?;
    renderer.write_table_of_contents(toc)?;
    renderer.write_pages()?;
    let (out, stats) = renderer.finish()?;

    tracing::info!(
        directories = stats.directories,
        pages = stats.pages,
        mentions = stats.mentions_rendered,
        chains = stats.chains_rendered,
        "rendered document"
    );
    Ok((out, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontologies_core::{build_table_of_contents, scan_mentions, ScanOptions, VaultOptions};
    use std::fs;
    use tempfile::tempdir;

    fn render(root: &Path) -> (String, RenderStats) {
        let vault = Vault::open(root, &VaultOptions::default());
        let toc = build_table_of_contents(&vault).unwrap();
        let scan = scan_mentions(&vault, &ScanOptions::default()).unwrap();
        let (bytes, stats) = render_document(
            &vault,
            &toc,
            &scan,
            &RenderOptions::default(),
            ChainOptions::default(),
            Vec::new(),
        )
        .unwrap();
        (String::from_utf8(bytes).unwrap(), stats)
    }

    #[test]
    fn test_toc_block_nests_subdirectories() {
        let node = TocNode {
            name: "root".to_string(),
            children: vec![TocNode {
                name: "A".to_string(),
                children: vec![TocNode {
                    name: "B".to_string(),
                    children: vec![],
                }],
            }],
        };
        let mut html = String::new();
        toc_block(&node, &mut html);
        assert_eq!(
            html,
            concat!(
                r#"<div style="margin-left: 1rem">"#,
                r##"<a href="#A">A</a><br>"##,
                r#"<div style="margin-left: 1rem">"#,
                r##"<a href="#B">B</a><br>"##,
                r#"<div style="margin-left: 1rem"></div>"#,
                "</div></div>"
            )
        );
    }

    #[test]
    fn test_index_page_has_no_extra_heading() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("Vault");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("Vault.md"), "index body").unwrap();
        fs::write(root.join("Other.md"), "other body").unwrap();

        let (html, stats) = render(&root);

        assert!(html.contains(r#"<h2 id="Vault">Vault</h2><hr>"#));
        assert!(!html.contains(r#"<h3 id="Vault">"#));
        assert!(html.contains(r#"<h3 id="Other">Other</h3><span id="Other.md">"#));
        // Index page is emitted before its siblings.
        let index_at = html.find("index body").unwrap();
        let other_at = html.find("other body").unwrap();
        assert!(index_at < other_at);
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.directories, 1);
    }

    #[test]
    fn test_pages_precede_subdirectories() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("Alpha")).unwrap();
        fs::write(root.join("Alpha").join("inner.md"), "inner").unwrap();
        fs::write(root.join("zeta.md"), "zeta").unwrap();

        let (html, _) = render(&root);
        assert!(html.find(r#"id="zeta""#).unwrap() < html.find(r#"<h2 id="Alpha">"#).unwrap());
    }

    #[test]
    fn test_mentions_and_links() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("notes");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("X.md"), "before [[Y]] after").unwrap();
        fs::write(root.join("Y.md"), "the target").unwrap();

        let (html, stats) = render(&root);

        assert!(html.contains(r##"<a href="#Y">Y</a>"##));
        assert!(html.contains(r#"<h4>Mentions</h4><ul class="mentions">"#));
        // Tokens quoted inside snippets are linked too.
        assert!(html.contains(
            r##"<li><a href="#X"><b>X</b></a> - "before <a href="#Y">Y</a> after"</li>"##
        ));
        assert!(html.contains(r#"<h4>Sub Ontologies for X</h4><ul class="sub-ontologies"><li>X -> Y</li></ul>"#));
        assert_eq!(stats.mentions_rendered, 1);
        assert_eq!(stats.chains_rendered, 1);
    }

    #[test]
    fn test_duplicate_chains_render_once() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("notes");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("A.md"), "[[B]] [[C]]").unwrap();

        let (html, _) = render(&root);
        assert!(html.contains(
            r#"<ul class="sub-ontologies"><li>A -> B</li><li>A -> C</li></ul>"#
        ));
    }

    #[test]
    fn test_directory_edges_do_not_become_chains() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("notes");
        fs::create_dir_all(root.join("Topic").join("Sub")).unwrap();
        fs::write(root.join("Topic").join("Topic.md"), "[[Sub]]").unwrap();

        let (html, _) = render(&root);
        assert!(!html.contains("Sub Ontologies for Topic"));
        assert!(html.contains(r##"<a href="#Sub">Sub</a>"##));
    }

    #[test]
    fn test_snippets_are_escaped() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("notes");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("A.md"), "x < y [[B]]").unwrap();
        fs::write(root.join("B.md"), "b").unwrap();

        let (html, _) = render(&root);
        assert!(html.contains(r##" - "x &lt; y <a href="#B">B</a>""##));
    }

    #[test]
    fn test_page_with_invalid_utf8_still_renders() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("notes");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("Good.md"), "[[A]]").unwrap();
        fs::write(root.join("Latin1.md"), b"caf\xe9 [[B]]").unwrap();

        let (html, stats) = render(&root);
        assert_eq!(stats.pages, 2);
        assert!(html.contains(r#"<h3 id="Latin1">"#));
        assert!(html.contains(r##"<a href="#B">B</a>"##));
        assert!(html.contains('\u{FFFD}'));
    }
}
