//! Link graph construction from a page → outbound-links mapping.
//!
//! # Overview
//!
//! A [`LinkGraph`] is a [`petgraph`] directed graph whose nodes are page
//! identifiers and whose edges are hyperlinks. An edge `A → B` means
//! "page A links to page B".
//!
//! ## Node Order
//!
//! Pages are inserted in sorted identifier order, so `NodeIndex(i)` is the
//! `i`-th page by name. Both estimators work on these indices, which keeps a
//! seeded random walk reproducible regardless of `HashMap` iteration order.
//!
//! ## Invariants
//!
//! - Every link target is itself a page of the graph.
//! - No page links to itself.
//! - At most one edge per ordered pair.
//!
//! ## Content Hash
//!
//! [`LinkGraph::content_hash`] is a BLAKE3 hash of the sorted page list and
//! edge list. Two graphs with the same pages and links hash equal.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::error::RankError;

// ---------------------------------------------------------------------------
// LinkGraph
// ---------------------------------------------------------------------------

/// An immutable hyperlink graph over a known corpus of pages.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    /// Directed graph: nodes = page identifiers, edges = hyperlinks.
    graph: DiGraph<String, ()>,
    /// Mapping from page identifier to petgraph `NodeIndex`.
    node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 content hash of the page and edge sets.
    content_hash: String,
}

impl LinkGraph {
    /// Build a [`LinkGraph`] from a mapping of page → pages it links to.
    ///
    /// Self-links are dropped. Duplicate links collapse into one edge.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if a link target is not a key of
    /// `links`. An empty mapping is accepted here; the estimators reject it.
    #[instrument(skip(links), fields(pages = links.len()))]
    pub fn from_links<S>(links: &HashMap<String, S>) -> Result<Self, RankError>
    where
        for<'a> &'a S: IntoIterator<Item = &'a String>,
    {
        for (page, targets) in links {
            if let Some(missing) = targets.into_iter().find(|t| !links.contains_key(*t)) {
                debug!(page = %page, target = %missing, "link to page outside corpus");
                return Err(RankError::UnknownPage(missing.clone()));
            }
        }
        Ok(Self::build(links))
    }

    /// Build a [`LinkGraph`], silently discarding links whose target is not a
    /// key of `links`.
    ///
    /// This is the lenient form used when links come from scraped documents,
    /// where references to external or missing pages are expected.
    #[must_use]
    #[instrument(skip(links), fields(pages = links.len()))]
    pub fn from_links_filtered<S>(links: &HashMap<String, S>) -> Self
    where
        for<'a> &'a S: IntoIterator<Item = &'a String>,
    {
        Self::build(links)
    }

    fn build<S>(links: &HashMap<String, S>) -> Self
    where
        for<'a> &'a S: IntoIterator<Item = &'a String>,
    {
        let pages: BTreeSet<&String> = links.keys().collect();

        let mut graph = DiGraph::<String, ()>::with_capacity(pages.len(), 0);
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(pages.len());

        for page in &pages {
            let idx = graph.add_node((*page).clone());
            node_map.insert((*page).clone(), idx);
        }

        let mut edges: Vec<(&String, &String)> = Vec::new();
        let mut dropped = 0_usize;
        for page in &pages {
            let targets: BTreeSet<&String> = (&links[*page]).into_iter().collect();
            for target in targets {
                if target == *page || !node_map.contains_key(target) {
                    dropped += 1;
                    continue;
                }
                edges.push((*page, target));
            }
        }

        for (from, to) in &edges {
            graph.add_edge(node_map[*from], node_map[*to], ());
        }

        if dropped > 0 {
            debug!(dropped, "dropped self-links and links outside the corpus");
        }

        let content_hash = compute_content_hash(&pages, &edges);

        Self {
            graph,
            node_map,
            content_hash,
        }
    }

    /// Number of pages in the corpus.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of hyperlinks.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    #[must_use]
    pub fn contains(&self, page: &str) -> bool {
        self.node_map.contains_key(page)
    }

    /// All page identifiers, sorted.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.graph.raw_nodes().iter().map(|n| n.weight.as_str())
    }

    /// Pages `page` links to, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if `page` is not in the graph.
    pub fn links(&self, page: &str) -> Result<Vec<&str>, RankError> {
        let idx = self.require(page)?;
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).map(String::as_str))
            .collect();
        out.sort_unstable();
        Ok(out)
    }

    /// Number of outbound links of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if `page` is not in the graph.
    pub fn out_degree(&self, page: &str) -> Result<usize, RankError> {
        let idx = self.require(page)?;
        Ok(self.out_degree_at(idx.index()))
    }

    /// `true` if `page` has no outbound links.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if `page` is not in the graph.
    pub fn is_sink(&self, page: &str) -> Result<bool, RankError> {
        Ok(self.out_degree(page)? == 0)
    }

    /// Pages with no outbound links, sorted.
    pub fn sinks(&self) -> impl Iterator<Item = &str> {
        (0..self.page_count())
            .filter(|&i| self.out_degree_at(i) == 0)
            .filter_map(|i| self.page_at(i))
    }

    /// BLAKE3 hash of the page and edge sets.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    // -----------------------------------------------------------------------
    // Index-based access for the estimators
    // -----------------------------------------------------------------------

    pub(crate) const fn inner(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    pub(crate) fn require(&self, page: &str) -> Result<NodeIndex, RankError> {
        self.node_map
            .get(page)
            .copied()
            .ok_or_else(|| RankError::UnknownPage(page.to_string()))
    }

    pub(crate) fn page_at(&self, idx: usize) -> Option<&str> {
        self.graph
            .node_weight(NodeIndex::new(idx))
            .map(String::as_str)
    }

    pub(crate) fn out_degree_at(&self, idx: usize) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .count()
    }

    pub(crate) fn targets_at(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .map(NodeIndex::index)
    }

    /// Map index-ordered values back to page identifiers.
    pub(crate) fn label(&self, values: &[f64]) -> HashMap<String, f64> {
        self.graph
            .raw_nodes()
            .iter()
            .map(|n| n.weight.clone())
            .zip(values.iter().copied())
            .collect()
    }
}

/// Build a link map from `(page, [targets])` literals. Handy in tests.
#[must_use]
pub fn link_map(entries: &[(&str, &[&str])]) -> HashMap<String, HashSet<String>> {
    entries
        .iter()
        .map(|(page, targets)| {
            (
                (*page).to_string(),
                targets.iter().map(|t| (*t).to_string()).collect(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compute_content_hash(pages: &BTreeSet<&String>, edges: &[(&String, &String)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for page in pages {
        hasher.update(page.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (from, to) in edges {
        hasher.update(from.as_bytes());
        hasher.update(b"\x00");
        hasher.update(to.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
