//! PageRank by fixed-point iteration.
//!
//! # Algorithm
//!
//! Start from the uniform vector `1 / N` and apply the recurrence
//!
//! ```text
//! PR'(p) = (1 - d) / N + d * Σ PR(i) / out_degree(i)   for each i → p
//! ```
//!
//! until the total change `Σ |PR'(p) - PR(p)|` between two sweeps is at
//! most `threshold`, which bounds every single page's change as well. Each
//! sweep scatters every page's rank along its outbound links, so it costs
//! `O(N + E)`.
//!
//! # Sinks
//!
//! Under [`SinkPolicy::Uniform`] a sink spreads `d * PR(sink) / N` to every
//! page, which is exactly the stationary distribution of the chain the
//! sampler walks. Under [`SinkPolicy::Drop`] sinks contribute nothing and
//! rank mass leaks out of the system on every sweep.
//!
//! # Termination
//!
//! Values accumulate in full precision and the convergence test uses
//! full-precision deltas. A sweep shrinks the total change by at least a
//! factor of `d`, so once it is within `threshold` any further sweep moves
//! each page by at most `d * threshold`. The sweep count is capped by
//! `RankConfig::max_iterations`; hitting the cap is an error, never a
//! silently returned partial answer.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::config::{RankConfig, SinkPolicy};
use crate::error::RankError;
use crate::graph::LinkGraph;
use crate::result::{RankMethod, RankResult};

/// Compute PageRank by iterating the recurrence to a fixed point.
///
/// # Errors
///
/// - [`RankError::EmptyGraph`] if `graph` has no pages.
/// - Any parameter error from [`RankConfig::validate`].
/// - [`RankError::DidNotConverge`] if `max_iterations` sweeps still leave a
///   total change above `threshold`.
#[instrument(skip_all, fields(pages = graph.page_count(), links = graph.link_count()))]
pub fn iterate_pagerank(graph: &LinkGraph, config: &RankConfig) -> Result<RankResult, RankError> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }
    config.validate()?;

    let n = graph.page_count();
    let mut ranks = vec![1.0 / n as f64; n];
    let mut next = vec![0.0_f64; n];
    let mut delta = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        sweep(graph, &ranks, &mut next, config.damping, config.sink_policy);

        delta = total_change(&ranks, &next);

        std::mem::swap(&mut ranks, &mut next);

        if delta <= config.threshold {
            debug!(iterations = iteration, delta, "iteration converged");
            return Ok(RankResult {
                scores: graph.label(&ranks),
                method: RankMethod::Iteration,
                steps: iteration as u64,
            });
        }
    }

    warn!(
        iterations = config.max_iterations,
        delta, "iteration hit the sweep cap without converging"
    );
    Err(RankError::DidNotConverge {
        iterations: config.max_iterations,
        delta,
    })
}

/// L1 distance between two rank vectors.
fn total_change(old: &[f64], new: &[f64]) -> f64 {
    old.iter().zip(new).map(|(a, b)| (a - b).abs()).sum()
}

/// Apply one sweep of the recurrence to `ranks`.
///
/// At the fixed point returned by [`iterate_pagerank`] no value moves by
/// more than the convergence threshold.
///
/// # Errors
///
/// - [`RankError::EmptyGraph`] if `graph` has no pages.
/// - [`RankError::UnknownPage`] if a page of `graph` is missing from `ranks`.
/// - [`RankError::InvalidDamping`] if `config.damping` is outside `[0, 1)`.
pub fn iterate_sweep(
    graph: &LinkGraph,
    ranks: &HashMap<String, f64>,
    config: &RankConfig,
) -> Result<HashMap<String, f64>, RankError> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }
    crate::config::validate_damping(config.damping)?;

    let current = graph
        .pages()
        .map(|page| {
            ranks
                .get(page)
                .copied()
                .ok_or_else(|| RankError::UnknownPage(page.to_string()))
        })
        .collect::<Result<Vec<f64>, RankError>>()?;

    let mut next = vec![0.0_f64; current.len()];
    sweep(graph, &current, &mut next, config.damping, config.sink_policy);
    Ok(graph.label(&next))
}

/// Write `PR'` for every page into `next`.
fn sweep(graph: &LinkGraph, ranks: &[f64], next: &mut [f64], damping: f64, sinks: SinkPolicy) {
    let n_f64 = ranks.len() as f64;

    let sink_mass: f64 = match sinks {
        SinkPolicy::Uniform => (0..ranks.len())
            .filter(|&i| graph.out_degree_at(i) == 0)
            .map(|i| ranks[i])
            .sum(),
        SinkPolicy::Drop => 0.0,
    };

    next.fill((1.0 - damping) / n_f64 + damping * sink_mass / n_f64);

    for (from, &rank) in ranks.iter().enumerate() {
        let out_degree = graph.out_degree_at(from);
        if out_degree == 0 {
            continue;
        }
        let share = damping * rank / out_degree as f64;
        for target in graph.targets_at(from) {
            next[target] += share;
        }
    }
}
