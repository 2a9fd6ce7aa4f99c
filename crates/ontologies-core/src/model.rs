//! Concept graph data model.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// Concepts and edges
// ============================================================================

/// A directory name or a page name (file name without extension).
///
/// Directories and pages share one namespace; collisions are never reconciled.
pub type Concept = String;

/// One root-to-leaf path of concept names, starting at the requested concept.
pub type OntologyChain = Vec<Concept>;

/// "`parent_concept` references/contains `child_aspect`".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub parent_concept: Concept,
    pub child_aspect: Concept,
}

impl Relationship {
    pub fn new(parent_concept: impl Into<Concept>, child_aspect: impl Into<Concept>) -> Self {
        Self {
            parent_concept: parent_concept.into(),
            child_aspect: child_aspect.into(),
        }
    }
}

/// Directory-derived edges, in discovery (pre-order) order.
///
/// Keeps an exact-equality lookup set next to the ordered list so the chain
/// generator can exclude structural edges without a linear scan per edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Relationship>", into = "Vec<Relationship>")]
pub struct PrimaryRelations {
    ordered: Vec<Relationship>,
    lookup: HashSet<Relationship>,
}

impl PrimaryRelations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory edge. Repeats are kept in the ordered list.
    pub fn push(&mut self, relation: Relationship) {
        self.lookup.insert(relation.clone());
        self.ordered.push(relation);
    }

    pub fn contains(&self, relation: &Relationship) -> bool {
        self.lookup.contains(relation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn as_slice(&self) -> &[Relationship] {
        &self.ordered
    }
}

impl From<Vec<Relationship>> for PrimaryRelations {
    fn from(relations: Vec<Relationship>) -> Self {
        let mut out = PrimaryRelations::new();
        for relation in relations {
            out.push(relation);
        }
        out
    }
}

impl From<PrimaryRelations> for Vec<Relationship> {
    fn from(relations: PrimaryRelations) -> Self {
        relations.ordered
    }
}

impl FromIterator<Relationship> for PrimaryRelations {
    fn from_iter<I: IntoIterator<Item = Relationship>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

// ============================================================================
// Mentions
// ============================================================================

/// One backlink: the page that mentions a concept, plus surrounding raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    pub source: Concept,
    pub snippet: String,
}

/// Referenced concept name → backlinks, each list in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentionIndex {
    by_target: BTreeMap<Concept, Vec<MentionRecord>>,
}

impl MentionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, target: &str, record: MentionRecord) {
        self.by_target
            .entry(target.to_string())
            .or_default()
            .push(record);
    }

    /// Backlinks for `target`; empty when nothing mentions it.
    pub fn mentions_of(&self, target: &str) -> &[MentionRecord] {
        self.by_target
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.by_target.keys().map(String::as_str)
    }

    /// Total number of records across all targets.
    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

/// Everything the mention scan accumulates over the whole vault.
///
/// Built once before any page is rendered, then only read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanContext {
    /// Page → referenced concept, one per occurrence (duplicates kept).
    pub edges: Vec<Relationship>,
    pub mentions: MentionIndex,
    /// Number of Markdown pages read.
    pub pages_scanned: usize,
}
