//! Sub-ontology chains: root-to-leaf label paths through mention edges.
//!
//! Primary (directory) edges are removed first; whatever remains is expanded
//! depth-first from the start concept. There is no visited set, so a cycle is
//! only cut by the depth bound: a chain never has more than `max_depth + 1`
//! elements, and a branch still expanding past `max_depth` is discarded.

use crate::model::{Concept, OntologyChain, PrimaryRelations, Relationship};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_DEPTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainOptions {
    pub max_depth: usize,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Enumerate every chain reachable from `start` through non-primary edges.
///
/// Emission order is depth-first in edge-list order. Each candidate edge whose
/// parent is `start` seeds its own traversal from `[start]`, so a start with
/// several outgoing edges produces repeated chains; callers deduplicate at
/// display time (see [`dedup_rendered`]).
pub fn generate_sub_ontologies(
    edges: &[Relationship],
    primaries: &PrimaryRelations,
    start: &str,
    options: &ChainOptions,
) -> Vec<OntologyChain> {
    let candidates: Vec<&Relationship> = edges
        .iter()
        .filter(|edge| !primaries.contains(edge))
        .collect();

    let mut chains = Vec::new();

    for root in children_of(&candidates, start) {
        // (chain so far, depth); the current concept is the chain's last label.
        let mut stack: Vec<(OntologyChain, usize)> = vec![(vec![root.parent_concept.clone()], 0)];

        while let Some((chain, depth)) = stack.pop() {
            if depth > options.max_depth {
                continue;
            }

            let current = chain.last().map(String::as_str).unwrap_or(start);
            let children = children_of(&candidates, current);
            if children.is_empty() {
                chains.push(chain);
                continue;
            }

            // Reverse so the first child is expanded first.
            for child in children.into_iter().rev() {
                let mut next = chain.clone();
                next.push(child.child_aspect.clone());
                stack.push((next, depth + 1));
            }
        }
    }

    chains
}

fn children_of<'a>(candidates: &[&'a Relationship], concept: &str) -> Vec<&'a Relationship> {
    candidates
        .iter()
        .copied()
        .filter(|edge| edge.parent_concept == concept)
        .collect()
}

/// Render each chain as `a -> b -> c`, dropping repeats but keeping the order
/// in which each distinct rendering first appeared.
pub fn dedup_rendered(chains: &[OntologyChain]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for chain in chains {
        let rendered = chain.join(" -> ");
        if seen.insert(rendered.clone()) {
            out.push(rendered);
        }
    }
    out
}

/// Concepts with at least one sub-ontology chain, in first-edge order.
///
/// A parent whose every branch runs past `max_depth` (e.g. a pure cycle) has
/// no chains and is left out.
pub fn chain_roots(
    edges: &[Relationship],
    primaries: &PrimaryRelations,
    options: &ChainOptions,
) -> Vec<Concept> {
    let mut seen = HashSet::new();
    edges
        .iter()
        .filter(|edge| !primaries.contains(edge))
        .filter(|edge| seen.insert(edge.parent_concept.as_str()))
        .filter(|edge| !generate_sub_ontologies(edges, primaries, &edge.parent_concept, options).is_empty())
        .map(|edge| edge.parent_concept.clone())
        .collect()
}
