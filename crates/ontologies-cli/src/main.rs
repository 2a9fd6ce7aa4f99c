//! Ontologies CLI
//!
//! Renders a directory of interlinked Markdown notes into one HTML document:
//! - table of contents from the directory nesting
//! - every page, with `[[Name]]` references linked in-page
//! - per-page backlinks ("Mentions") and derived sub-ontology chains

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use ontologies_core::{build_table_of_contents, scan_mentions, SnippetAnchor, Vault};
use ontologies_render::render_document;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod output;

use config::OntologiesConfig;
use output::{open_output, GraphExport};

#[derive(Parser)]
#[command(name = "ontologies")]
#[command(
    author,
    version,
    about = "Render a Markdown note vault to a single HTML document with backlinks and sub-ontologies"
)]
struct Cli {
    /// Root directory of the note vault
    root: PathBuf,

    /// Output HTML file (replaced if it exists)
    #[arg(short, long, default_value = "ontologies.html")]
    out: PathBuf,

    /// JSON config file (`vault`, `scan`, `chains`, `render` sections)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Author line under the title
    #[arg(long)]
    author: Option<String>,

    /// Stylesheet href written into the document head
    #[arg(long)]
    stylesheet: Option<String>,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "skip-dir", value_name = "NAME")]
    skip_dirs: Vec<String>,

    /// Maximum sub-ontology expansion depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Centre each mention snippet on its own occurrence instead of the
    /// first occurrence of the same token in the page
    #[arg(long)]
    snippets_per_occurrence: bool,

    /// Also write the concept graph (relations, edges, mentions) as JSON
    #[arg(long, value_name = "PATH")]
    graph_out: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<OntologiesConfig> {
        let mut config = OntologiesConfig::load(self.config.as_deref())?;

        if let Some(title) = &self.title {
            config.render.title = title.clone();
        }
        if let Some(author) = &self.author {
            config.render.author = author.clone();
        }
        if let Some(stylesheet) = &self.stylesheet {
            config.render.stylesheet = stylesheet.clone();
        }
        for name in &self.skip_dirs {
            if !config.vault.skip_dirs.contains(name) {
                config.vault.skip_dirs.push(name.clone());
            }
        }
        if let Some(max_depth) = self.max_depth {
            config.chains.max_depth = max_depth;
        }
        if self.snippets_per_occurrence {
            config.scan.snippet_anchor = SnippetAnchor::Occurrence;
        }

        Ok(config)
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ontologies=info,ontologies_core=info,ontologies_render=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.resolve_config()?;
    let vault = Vault::open(&cli.root, &config.vault);
    tracing::info!(root = %cli.root.display(), out = %cli.out.display(), "rendering vault");

    let toc = build_table_of_contents(&vault)
        .with_context(|| format!("failed to walk {}", cli.root.display()))?;
    let scan = scan_mentions(&vault, &config.scan)
        .with_context(|| format!("failed to scan {}", cli.root.display()))?;

    let out = open_output(&cli.out)?;
    let (_, stats) = render_document(&vault, &toc, &scan, &config.render, config.chains, out)
        .with_context(|| format!("failed to render {}", cli.out.display()))?;

    eprintln!(
        "{} rendered {} pages in {} directories ({} mentions, {} sub-ontologies)",
        "ok".green().bold(),
        stats.pages,
        stats.directories,
        stats.mentions_rendered,
        stats.chains_rendered
    );
    eprintln!("{} {}", "wrote".green().bold(), cli.out.display().to_string().bold());

    if let Some(graph_out) = &cli.graph_out {
        GraphExport::new(&toc.primary_relations, &scan, &config.chains).write(graph_out)?;
        eprintln!("{} {}", "wrote".green().bold(), graph_out.display().to_string().bold());
    }

    Ok(())
}
