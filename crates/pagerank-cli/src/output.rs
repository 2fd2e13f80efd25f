//! Rendering of a [`RankReport`] as pretty, plain-text or JSON output.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / `--json` flag
//! 2. `PAGERANK_FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Text output is the classic two-block listing, ranks to four places:
//!
//! ```text
//! PageRank Results from Sampling (n = 10000)
//!   1.html: 0.2223
//! PageRank Results from Iteration
//!   1.html: 0.2202
//! ```

use std::io::{self, IsTerminal, Write};

use clap::ValueEnum;
use pagerank_core::{RankMethod, RankResult};
use serde_json::json;

use crate::report::{RankReport, sorted_scores};

/// Decimal places shown for ranks in human output.
pub const RANK_PLACES: i32 = 4;

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 48;

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, corpus summary, comparison).
    Pretty,
    /// The plain two-block listing.
    Text,
    /// Machine-readable JSON, full precision.
    Json,
}

/// Resolve the effective output mode from flags, environment and TTY state.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env = std::env::var("PAGERANK_FORMAT").ok();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        env.as_deref(),
        io::stdout().is_terminal(),
    )
}

fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value: fall through to TTY detection
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Write `report` to `w` in `mode`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render(report: &RankReport, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
    match mode {
        OutputMode::Text => render_text(report, w),
        OutputMode::Pretty => render_pretty(report, w),
        OutputMode::Json => render_json(report, w),
    }
}

fn heading(result: &RankResult) -> String {
    match result.method {
        RankMethod::Sampling { samples } => {
            format!("PageRank Results from Sampling (n = {samples})")
        }
        RankMethod::Iteration => "PageRank Results from Iteration".to_string(),
    }
}

fn render_ranks(result: &RankResult, w: &mut dyn Write) -> io::Result<()> {
    let rounded = result.rounded(RANK_PLACES);
    for (page, rank) in rounded.sorted() {
        writeln!(w, "  {page}: {rank:.4}")?;
    }
    Ok(())
}

fn render_text(report: &RankReport, w: &mut dyn Write) -> io::Result<()> {
    for result in [&report.sampling, &report.iteration] {
        writeln!(w, "{}", heading(result))?;
        render_ranks(result, w)?;
    }
    Ok(())
}

fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<18} {}", format!("{key}:"), value.as_ref())
}

fn render_pretty(report: &RankReport, w: &mut dyn Write) -> io::Result<()> {
    let stats = &report.corpus.stats;
    writeln!(w, "Corpus")?;
    pretty_rule(w)?;
    pretty_kv(w, "pages", stats.page_count.to_string())?;
    pretty_kv(w, "links", stats.link_count.to_string())?;
    pretty_kv(w, "sinks", stats.sink_count.to_string())?;
    pretty_kv(w, "damping", report.config.damping.to_string())?;
    writeln!(w)?;

    for result in [&report.sampling, &report.iteration] {
        writeln!(w, "{}", heading(result))?;
        pretty_rule(w)?;
        render_ranks(result, w)?;
        if result.method == RankMethod::Iteration {
            pretty_kv(w, "sweeps", result.steps.to_string())?;
        }
        writeln!(w)?;
    }

    pretty_kv(
        w,
        "max disagreement",
        format!("{:.4}", report.max_disagreement()),
    )
}

fn render_json(report: &RankReport, w: &mut dyn Write) -> io::Result<()> {
    let value = json!({
        "corpus": report.corpus,
        "config": report.config,
        "sampling": {
            "samples": report.sampling.steps,
            "ranks": sorted_scores(&report.sampling),
        },
        "iteration": {
            "sweeps": report.iteration.steps,
            "ranks": sorted_scores(&report.iteration),
        },
        "max_disagreement": report.max_disagreement(),
    });
    serde_json::to_writer_pretty(&mut *w, &value).map_err(io::Error::other)?;
    writeln!(w)
}
