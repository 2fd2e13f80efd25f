use serde::{Deserialize, Serialize};

use crate::error::RankError;

/// How the iterative solver treats pages with no outbound links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkPolicy {
    /// A sink spreads its damped mass evenly over every page, matching the
    /// transition model the sampler walks.
    #[default]
    Uniform,
    /// A sink contributes nothing. Ranks then leak mass and need not sum to 1.
    Drop,
}

/// Parameters shared by both estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankConfig {
    /// Probability of following a link rather than teleporting.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Number of random-walk steps taken by the sampler.
    #[serde(default = "default_samples")]
    pub samples: u64,
    /// Largest per-page change between sweeps that still counts as converged.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Sweep cap for the iterative solver.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Upper bound on `samples`; larger requests are refused, not truncated.
    #[serde(default = "default_max_samples")]
    pub max_samples: u64,
    #[serde(default)]
    pub sink_policy: SinkPolicy,
    /// Seed for the sampler. `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            samples: default_samples(),
            threshold: default_threshold(),
            max_iterations: default_max_iterations(),
            max_samples: default_max_samples(),
            sink_policy: SinkPolicy::default(),
            seed: None,
        }
    }
}

impl RankConfig {
    /// Reject parameters neither estimator can run with.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter as a [`RankError`].
    pub fn validate(&self) -> Result<(), RankError> {
        validate_damping(self.damping)?;
        if self.samples < 1 {
            return Err(RankError::InvalidSampleCount(self.samples));
        }
        if self.samples > self.max_samples {
            return Err(RankError::SampleLimitExceeded {
                requested: self.samples,
                limit: self.max_samples,
            });
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(RankError::InvalidThreshold(self.threshold));
        }
        if self.max_iterations < 1 {
            return Err(RankError::InvalidIterationCap);
        }
        Ok(())
    }
}

/// Estimators require `0 <= damping < 1`; at 1 the chain is not ergodic.
pub(crate) fn validate_damping(damping: f64) -> Result<(), RankError> {
    if (0.0..1.0).contains(&damping) {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(damping))
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_samples() -> u64 {
    10_000
}

const fn default_threshold() -> f64 {
    0.001
}

const fn default_max_iterations() -> usize {
    1_000
}

const fn default_max_samples() -> u64 {
    10_000_000
}
