//! Single-file HTML rendering for a Markdown vault.
//!
//! Pages are converted with comrak, cross-references become in-page anchors,
//! and each page is followed by its backlinks ("Mentions") and derived
//! sub-ontology chains. Output is appended fragment by fragment to any
//! [`std::io::Write`] sink.

pub mod document;
pub mod error;
pub mod links;
pub mod markdown;

pub use document::{render_document, DocumentRenderer, RenderOptions, RenderStats};
pub use error::{RenderError, Result};
pub use links::{escape_html, link_references};
pub use markdown::markdown_to_html;
