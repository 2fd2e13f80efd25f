use std::collections::HashMap;

use serde::Serialize;

/// Which estimator produced a [`RankResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankMethod {
    /// Visit frequency of a random walk of `samples` steps.
    Sampling { samples: u64 },
    /// Fixed point of the PageRank recurrence.
    Iteration,
}

/// Ranks for every page of a graph, in full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    /// Page identifier → rank in `[0, 1]`.
    pub scores: HashMap<String, f64>,
    pub method: RankMethod,
    /// Walk steps taken (sampling) or sweeps performed (iteration).
    pub steps: u64,
}

impl RankResult {
    #[must_use]
    pub fn get(&self, page: &str) -> Option<f64> {
        self.scores.get(page).copied()
    }

    /// Sum of all ranks.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// `(page, rank)` pairs sorted by page identifier.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = self
            .scores
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        out.sort_unstable_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Copy with every rank rounded to `places` decimal places.
    #[must_use]
    pub fn rounded(&self, places: i32) -> Self {
        let scale = 10_f64.powi(places);
        Self {
            scores: self
                .scores
                .iter()
                .map(|(k, v)| (k.clone(), (v * scale).round() / scale))
                .collect(),
            method: self.method,
            steps: self.steps,
        }
    }

    /// Page with the highest rank. Ties go to the smaller identifier.
    #[must_use]
    pub fn top(&self) -> Option<(&str, f64)> {
        self.sorted()
            .into_iter()
            .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
    }

    /// Largest absolute rank difference over pages present in both results.
    ///
    /// Pages missing from `other` count as rank 0.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.scores
            .iter()
            .map(|(page, rank)| (rank - other.get(page).unwrap_or(0.0)).abs())
            .fold(0.0, f64::max)
    }
}
