//! Run configuration: built-in defaults, then an optional TOML file, then
//! command-line flags.
//!
//! ```toml
//! damping = 0.85
//! samples = 10000
//! threshold = 0.001
//! max_iterations = 1000
//! sink_policy = "uniform"   # or "drop"
//! seed = 42
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use pagerank_core::{RankConfig, SinkPolicy};

/// Command-line spelling of [`SinkPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkPolicyArg {
    Uniform,
    Drop,
}

impl From<SinkPolicyArg> for SinkPolicy {
    fn from(arg: SinkPolicyArg) -> Self {
        match arg {
            SinkPolicyArg::Uniform => Self::Uniform,
            SinkPolicyArg::Drop => Self::Drop,
        }
    }
}

/// Flag values that override the file configuration when present.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub damping: Option<f64>,
    pub samples: Option<u64>,
    pub threshold: Option<f64>,
    pub max_iterations: Option<usize>,
    pub max_samples: Option<u64>,
    pub sink_policy: Option<SinkPolicyArg>,
    pub seed: Option<u64>,
}

/// Load a [`RankConfig`] from `path`, or defaults when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`RankConfig`].
pub fn load_config(path: Option<&Path>) -> Result<RankConfig> {
    let Some(path) = path else {
        return Ok(RankConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    toml::from_str::<RankConfig>(&content)
        .with_context(|| format!("parse config file {}", path.display()))
}

/// Apply flag overrides on top of `config`.
#[must_use]
pub fn resolve(mut config: RankConfig, overrides: &Overrides) -> RankConfig {
    if let Some(damping) = overrides.damping {
        config.damping = damping;
    }
    if let Some(samples) = overrides.samples {
        config.samples = samples;
    }
    if let Some(threshold) = overrides.threshold {
        config.threshold = threshold;
    }
    if let Some(max_iterations) = overrides.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(max_samples) = overrides.max_samples {
        config.max_samples = max_samples;
    }
    if let Some(policy) = overrides.sink_policy {
        config.sink_policy = policy.into();
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    config
}
