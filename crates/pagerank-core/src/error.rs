//! Error taxonomy for rank computations.
//!
//! Three families, each with a stable machine code:
//!
//! - `E1xxx` invalid graph (empty, unknown page)
//! - `E2xxx` invalid parameters (damping, sample count, limits)
//! - `E3xxx` numerical failures (non-convergence, unusable transition row)
//!
//! All errors are raised before any partial result is produced.

/// Errors returned by the graph constructor and both estimators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    /// The graph has no pages, so `1 / N` is undefined.
    #[error("link graph is empty")]
    EmptyGraph,

    /// A page identifier was referenced that is not a key of the graph.
    #[error("page not found in link graph: {0}")]
    UnknownPage(String),

    /// Damping must be a finite probability (`[0, 1)` for the estimators).
    #[error("damping factor {0} is out of range")]
    InvalidDamping(f64),

    /// The sampling estimator needs at least one step.
    #[error("sample count must be at least 1, got {0}")]
    InvalidSampleCount(u64),

    /// Requested sample count exceeds the configured walk limit.
    #[error("sample count {requested} exceeds the limit of {limit}")]
    SampleLimitExceeded { requested: u64, limit: u64 },

    /// Convergence threshold must be finite and positive.
    #[error("convergence threshold {0} must be positive and finite")]
    InvalidThreshold(f64),

    /// The iteration cap must allow at least one sweep.
    #[error("iteration cap must be at least 1")]
    InvalidIterationCap,

    /// The iterative solver hit its sweep cap with ranks still moving.
    #[error("did not converge after {iterations} sweeps (total change {delta:.6})")]
    DidNotConverge { iterations: usize, delta: f64 },

    /// A page's transition row could not be turned into a sampler.
    #[error("transition row for page {0} has no valid weights")]
    InvalidTransitionRow(String),
}

impl RankError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyGraph => "E1001",
            Self::UnknownPage(_) => "E1002",
            Self::InvalidDamping(_) => "E2001",
            Self::InvalidSampleCount(_) => "E2002",
            Self::SampleLimitExceeded { .. } => "E2003",
            Self::InvalidThreshold(_) => "E2004",
            Self::InvalidIterationCap => "E2005",
            Self::DidNotConverge { .. } => "E3001",
            Self::InvalidTransitionRow(_) => "E3002",
        }
    }

    /// Optional remediation hint for terminal output.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EmptyGraph => Some("Point the crawler at a directory containing .html pages."),
            Self::UnknownPage(_) => Some("Filter links to pages outside the corpus first."),
            Self::InvalidDamping(_) => Some("Use a damping factor in [0, 1), e.g. 0.85."),
            Self::InvalidSampleCount(_) => None,
            Self::SampleLimitExceeded { .. } => {
                Some("Lower --samples or raise max_samples in the config file.")
            }
            Self::InvalidThreshold(_) | Self::InvalidIterationCap | Self::InvalidTransitionRow(_) => {
                None
            }
            Self::DidNotConverge { .. } => {
                Some("Raise max_iterations or loosen the convergence threshold.")
            }
        }
    }

    /// `true` for errors caused by the graph rather than the parameters.
    #[must_use]
    pub const fn is_invalid_graph(&self) -> bool {
        matches!(self, Self::EmptyGraph | Self::UnknownPage(_))
    }
}
