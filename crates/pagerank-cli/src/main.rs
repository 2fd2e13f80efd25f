#![forbid(unsafe_code)]

mod config;
mod crawl;
mod output;
mod report;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use output::OutputMode;
use pagerank_core::RankError;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rank the pages of an HTML corpus with PageRank",
    long_about = "Crawl a directory of .html pages, then estimate each page's PageRank \
                  twice: by sampling a random surfer and by iterating to a fixed point.",
    after_help = "EXAMPLES:\n    # Rank a corpus with the defaults (damping 0.85, 10000 samples)\n    pagerank corpus0\n\n    # Reproducible run with more samples\n    pagerank corpus0 --samples 100000 --seed 42\n\n    # Emit machine-readable output\n    pagerank corpus0 --json"
)]
struct Cli {
    /// Directory containing the .html pages to rank.
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page.
    #[arg(short, long)]
    damping: Option<f64>,

    /// Random-walk steps taken by the sampling estimator.
    #[arg(short = 'n', long)]
    samples: Option<u64>,

    /// Per-page change below which iteration stops.
    #[arg(long)]
    threshold: Option<f64>,

    /// Sweep cap for the iterative solver.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Refuse sample counts above this limit.
    #[arg(long)]
    max_samples: Option<u64>,

    /// How the iterative solver treats pages without links.
    #[arg(long, value_enum)]
    sink_policy: Option<config::SinkPolicyArg>,

    /// Seed for the sampling estimator.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with defaults for the options above.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (shorthand for `--format json`).
    #[arg(long)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            damping: self.damping,
            samples: self.samples,
            threshold: self.threshold,
            max_iterations: self.max_iterations,
            max_samples: self.max_samples,
            sink_policy: self.sink_policy,
            seed: self.seed,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PAGERANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "pagerank=debug,info"
        } else {
            "pagerank=info,warn"
        })
    });

    let format = env::var("PAGERANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

/// Attach the stable code and remediation hint to a core error.
fn rank_error(err: RankError) -> anyhow::Error {
    let code = err.code();
    match err.hint() {
        Some(hint) => anyhow!("{err} [{code}]\nhint: {hint}"),
        None => anyhow!("{err} [{code}]"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_config = config::load_config(cli.config.as_deref())?;
    let config = config::resolve(file_config, &cli.overrides());
    debug!(?config, "resolved configuration");
    config.validate().map_err(rank_error)?;

    let graph = crawl::crawl(&cli.corpus)
        .with_context(|| format!("crawl corpus {}", cli.corpus.display()))?;
    info!(
        pages = graph.page_count(),
        links = graph.link_count(),
        "corpus loaded"
    );

    let report = report::run(&graph, &config).map_err(rank_error)?;

    let mode = output::resolve_output_mode(cli.format, cli.json);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render(&report, mode, &mut out)?;
    out.flush()?;

    Ok(())
}
