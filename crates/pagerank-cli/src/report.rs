//! Both estimators run side by side over one corpus.

use std::collections::BTreeMap;

use pagerank_core::graph::GraphStats;
use pagerank_core::sampling::rng_for;
use pagerank_core::{
    LinkGraph, RankConfig, RankError, RankResult, iterate_pagerank, sample_pagerank,
};
use serde::Serialize;
use tracing::{info, instrument};

/// Everything one run produces, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub corpus: CorpusSummary,
    pub config: RankConfig,
    pub sampling: RankResult,
    pub iteration: RankResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorpusSummary {
    #[serde(flatten)]
    pub stats: GraphStats,
    pub content_hash: String,
}

impl RankReport {
    /// Largest per-page gap between the two estimates.
    #[must_use]
    pub fn max_disagreement(&self) -> f64 {
        self.sampling.max_abs_diff(&self.iteration)
    }
}

/// Validate `config`, then run the sampler and the solver over `graph`.
///
/// # Errors
///
/// Returns the first [`RankError`] from validation or either estimator.
/// No partial report is produced.
#[instrument(skip_all, fields(pages = graph.page_count()))]
pub fn run(graph: &LinkGraph, config: &RankConfig) -> Result<RankReport, RankError> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }
    config.validate()?;

    let mut rng = rng_for(config);
    let sampling = sample_pagerank(graph, config, &mut rng)?;
    let iteration = iterate_pagerank(graph, config)?;

    let report = RankReport {
        corpus: CorpusSummary {
            stats: GraphStats::from_graph(graph),
            content_hash: graph.content_hash().to_string(),
        },
        config: config.clone(),
        sampling,
        iteration,
    };

    info!(
        sweeps = report.iteration.steps,
        max_disagreement = report.max_disagreement(),
        "ranking complete"
    );
    Ok(report)
}

/// Ranks sorted by page identifier, for stable JSON output.
#[must_use]
pub fn sorted_scores(result: &RankResult) -> BTreeMap<&str, f64> {
    result.sorted().into_iter().collect()
}
