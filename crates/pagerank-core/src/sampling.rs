//! Monte Carlo PageRank by random-surfer sampling.
//!
//! # Algorithm
//!
//! 1. Start on a page chosen uniformly at random.
//! 2. For `n` steps: count a visit to the current page, then draw the next
//!    page from its [`transition`](crate::transition::transition) row.
//! 3. Each page's rank is `visits / n`.
//!
//! The chain is ergodic for damping < 1 (every page is one teleport away),
//! so the estimate converges to the stationary distribution regardless of
//! the start page.
//!
//! Visits are counted exactly; the division happens once at the end, so the
//! ranks sum to 1 up to floating-point error.
//!
//! # Randomness
//!
//! The random source is a parameter. Pass a seeded `StdRng` (or any other
//! [`rand::Rng`]) for reproducible walks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, trace};

use crate::config::RankConfig;
use crate::error::RankError;
use crate::graph::LinkGraph;
use crate::result::{RankMethod, RankResult};
use crate::transition::TransitionTable;

/// Steps between progress events.
const PROGRESS_INTERVAL: u64 = 1 << 20;

/// Estimate PageRank from `config.samples` steps of a random walk.
///
/// # Errors
///
/// - [`RankError::EmptyGraph`] if `graph` has no pages.
/// - Any parameter error from [`RankConfig::validate`], including
///   [`RankError::SampleLimitExceeded`] when `samples > max_samples`.
/// - [`RankError::InvalidTransitionRow`] if a visited page's row cannot be
///   sampled.
#[instrument(skip_all, fields(pages = graph.page_count(), samples = config.samples))]
pub fn sample_pagerank<R: Rng + ?Sized>(
    graph: &LinkGraph,
    config: &RankConfig,
    rng: &mut R,
) -> Result<RankResult, RankError> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }
    config.validate()?;

    let n = graph.page_count();
    let samples = config.samples;
    let mut table = TransitionTable::new(graph, config.damping);
    let mut visits = vec![0_u64; n];

    let mut current = rng.gen_range(0..n);
    debug!(start = graph.page_at(current), "random walk started");

    for step in 0..samples {
        visits[current] += 1;
        current = table.step(current, rng)?;

        if step > 0 && step % PROGRESS_INTERVAL == 0 {
            trace!(step, "random walk progress");
        }
    }

    debug!(rows_built = table.built(), "random walk finished");

    let total = samples as f64;
    let ranks: Vec<f64> = visits.iter().map(|&v| v as f64 / total).collect();

    Ok(RankResult {
        scores: graph.label(&ranks),
        method: RankMethod::Sampling { samples },
        steps: samples,
    })
}

/// [`sample_pagerank`] with a `StdRng` seeded from `seed`.
///
/// # Errors
///
/// Same as [`sample_pagerank`].
pub fn sample_pagerank_seeded(
    graph: &LinkGraph,
    config: &RankConfig,
    seed: u64,
) -> Result<RankResult, RankError> {
    let mut rng = StdRng::seed_from_u64(seed);
    sample_pagerank(graph, config, &mut rng)
}

/// Random source for `config`: seeded when `config.seed` is set, otherwise
/// from OS entropy.
#[must_use]
pub fn rng_for(config: &RankConfig) -> StdRng {
    config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}
