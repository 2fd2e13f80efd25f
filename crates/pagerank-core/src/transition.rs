//! Random-surfer transition model.
//!
//! # Model
//!
//! From page `p` in a corpus of `N` pages, the surfer moves to page `q` with
//! probability
//!
//! ```text
//! P(p → q) = (1 - d) / N + d / |L(p)|   if q ∈ L(p)
//!          = (1 - d) / N                otherwise
//! ```
//!
//! where `L(p)` is the set of pages `p` links to and `d` is the damping
//! factor. A sink (`L(p)` empty) is treated as linking to every page, so
//! its row is uniform: `(1 - d) / N + d / N = 1 / N`.
//!
//! [`transition`] returns the row as a labelled [`Distribution`].
//! [`TransitionTable`] is the index-based form the sampler draws from; it
//! builds each page's weighted sampler on first use and keeps it.

use std::collections::HashMap;

use rand::Rng;
use rand::distributions::{Distribution as _, WeightedIndex};
use serde::Serialize;

use crate::error::RankError;
use crate::graph::LinkGraph;

/// A probability distribution over the pages of a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution(HashMap<String, f64>);

impl Distribution {
    /// Probability assigned to `page`, or `None` if it is not in the graph.
    #[must_use]
    pub fn get(&self, page: &str) -> Option<f64> {
        self.0.get(page).copied()
    }

    /// Sum of all probabilities. `1.0` up to rounding.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn into_inner(self) -> HashMap<String, f64> {
        self.0
    }
}

/// Probability distribution over the next page, given the current `page`.
///
/// Accepts any damping in `[0, 1]`; the estimators are stricter.
///
/// # Errors
///
/// - [`RankError::EmptyGraph`] if `graph` has no pages.
/// - [`RankError::UnknownPage`] if `page` is not in `graph`.
/// - [`RankError::InvalidDamping`] if `damping` is outside `[0, 1]`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<Distribution, RankError> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }
    if !(0.0..=1.0).contains(&damping) {
        return Err(RankError::InvalidDamping(damping));
    }
    let idx = graph.require(page)?;
    let row = transition_row(graph, idx.index(), damping);
    Ok(Distribution(graph.label(&row)))
}

/// Index-ordered transition probabilities out of page `from`.
pub(crate) fn transition_row(graph: &LinkGraph, from: usize, damping: f64) -> Vec<f64> {
    let n = graph.page_count();
    let n_f64 = n as f64;
    let mut row = vec![(1.0 - damping) / n_f64; n];

    let out_degree = graph.out_degree_at(from);
    if out_degree == 0 {
        let share = damping / n_f64;
        for p in &mut row {
            *p += share;
        }
    } else {
        let share = damping / out_degree as f64;
        for target in graph.targets_at(from) {
            row[target] += share;
        }
    }

    row
}

/// Lazily built per-page samplers over [`transition_row`].
pub(crate) struct TransitionTable<'g> {
    graph: &'g LinkGraph,
    damping: f64,
    samplers: Vec<Option<WeightedIndex<f64>>>,
}

impl<'g> TransitionTable<'g> {
    pub(crate) fn new(graph: &'g LinkGraph, damping: f64) -> Self {
        Self {
            graph,
            damping,
            samplers: (0..graph.page_count()).map(|_| None).collect(),
        }
    }

    /// Draw the page the surfer visits after `from`.
    ///
    /// Fails with [`RankError::InvalidTransitionRow`] when the row's weights
    /// are not finite and non-negative, e.g. for a NaN damping factor.
    pub(crate) fn step<R: Rng + ?Sized>(
        &mut self,
        from: usize,
        rng: &mut R,
    ) -> Result<usize, RankError> {
        let slot = &mut self.samplers[from];
        if slot.is_none() {
            let row = transition_row(self.graph, from, self.damping);
            let sampler = WeightedIndex::new(&row).map_err(|_| {
                let page = self.graph.page_at(from).unwrap_or_default();
                RankError::InvalidTransitionRow(page.to_string())
            })?;
            *slot = Some(sampler);
        }
        Ok(slot
            .as_ref()
            .map_or(from, |sampler| sampler.sample(rng)))
    }

    /// Number of pages whose sampler has been built so far.
    pub(crate) fn built(&self) -> usize {
        self.samplers.iter().filter(|s| s.is_some()).count()
    }
}
