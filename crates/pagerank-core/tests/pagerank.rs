//! Sampling vs iteration agreement on fixed and seeded random link graphs.
//!
//! # Test Strategy
//!
//! 1. Generate seeded random link graphs (may contain cycles and sinks).
//! 2. Run the iterative solver and the sampling estimator on each.
//! 3. Assert both are probability vectors and agree within `AGREEMENT`.
//!
//! The iterative solver's fixed point is also checked for idempotence at the
//! default threshold, including graphs where most pages link to one hub: one
//! more sweep must not move any page by more than the threshold.
//!
//! # Sink handling
//!
//! With `SinkPolicy::Uniform` both estimators target the same chain. With
//! `SinkPolicy::Drop` the solver leaks mass at every sink, and the tests
//! below pin down that it then disagrees with the sampler.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pagerank_core::graph::link_map;
use pagerank_core::iterate::iterate_sweep;
use pagerank_core::{
    LinkGraph, RankConfig, RankError, RankMethod, SinkPolicy, iterate_pagerank, sample_pagerank,
    sample_pagerank_seeded,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Max per-page disagreement between estimators at 10 000 samples.
const AGREEMENT: f64 = 0.05;
/// Sum tolerance for full-precision results.
const SUM_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Graph construction helpers
// ---------------------------------------------------------------------------

struct RandomGraphParams {
    pages: usize,
    /// Upper bound on outbound links per page (self-links are skipped).
    max_links: usize,
}

fn random_graph(seed: u64, params: &RandomGraphParams) -> LinkGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..params.pages).map(|i| format!("{i}.html")).collect();

    let mut links: HashMap<String, HashSet<String>> = HashMap::new();
    for (i, page) in names.iter().enumerate() {
        let count = rng.gen_range(0..=params.max_links);
        let mut targets = HashSet::new();
        for _ in 0..count {
            let j = rng.gen_range(0..params.pages);
            if j != i {
                targets.insert(names[j].clone());
            }
        }
        links.insert(page.clone(), targets);
    }

    LinkGraph::from_links(&links).expect("generated links stay inside the corpus")
}

/// Most pages link to page 0; the rest link at random.
fn hub_graph(seed: u64, pages: usize) -> LinkGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..pages).map(|i| format!("{i}.html")).collect();

    let mut links: HashMap<String, HashSet<String>> = HashMap::new();
    for (i, page) in names.iter().enumerate() {
        let mut targets = HashSet::new();
        if i != 0 && rng.gen_bool(0.7) {
            targets.insert(names[0].clone());
        } else {
            let j = rng.gen_range(0..pages);
            if j != i {
                targets.insert(names[j].clone());
            }
        }
        links.insert(page.clone(), targets);
    }

    LinkGraph::from_links(&links).expect("generated links stay inside the corpus")
}

fn three_page_graph() -> LinkGraph {
    LinkGraph::from_links(&link_map(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &[])]))
        .expect("build graph")
}

fn default_config() -> RankConfig {
    RankConfig::default()
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn two_page_cycle_converges_to_half() {
    let graph = LinkGraph::from_links(&link_map(&[("A", &["B"]), ("B", &["A"])]))
        .expect("build graph");

    let iterated = iterate_pagerank(&graph, &default_config()).expect("converges");
    assert!((iterated.get("A").expect("A") - 0.5).abs() < 1e-9);
    assert!((iterated.get("B").expect("B") - 0.5).abs() < 1e-9);

    let sampled = sample_pagerank_seeded(&graph, &default_config(), 17).expect("sample");
    assert!((sampled.get("A").expect("A") - 0.5).abs() < AGREEMENT);
    assert!((sampled.get("B").expect("B") - 0.5).abs() < AGREEMENT);
}

#[test]
fn three_page_graph_orders_sink_highest() {
    let graph = three_page_graph();
    let config = default_config();

    let iterated = iterate_pagerank(&graph, &config).expect("converges");
    let sampled = sample_pagerank_seeded(&graph, &config, 5).expect("sample");

    for result in [&iterated, &sampled] {
        let a = result.get("A").expect("A");
        let b = result.get("B").expect("B");
        let c = result.get("C").expect("C");
        assert!(c > b && b > a, "{:?}: expected C > B > A, got {a} {b} {c}", result.method);
        assert!((result.total() - 1.0).abs() < SUM_EPSILON);
    }
    assert_eq!(iterated.top().map(|(p, _)| p), Some("C"));
}

#[test]
fn single_page_without_links_gets_full_rank() {
    let graph = LinkGraph::from_links(&link_map(&[("solo.html", &[])])).expect("build graph");
    let config = default_config();

    let iterated = iterate_pagerank(&graph, &config).expect("converges");
    let sampled = sample_pagerank_seeded(&graph, &config, 0).expect("sample");

    assert!((iterated.get("solo.html").expect("page") - 1.0).abs() < 1e-12);
    assert!((sampled.get("solo.html").expect("page") - 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Random graphs
// ---------------------------------------------------------------------------

#[test]
fn iteration_sums_to_one_random_graphs() {
    let params = RandomGraphParams {
        pages: 40,
        max_links: 5,
    };
    for seed in 0..20_u64 {
        let graph = random_graph(seed, &params);
        let result = iterate_pagerank(&graph, &default_config()).expect("converges");
        let sum = result.total();
        assert!(
            (sum - 1.0).abs() < SUM_EPSILON,
            "seed={seed}: PageRank sum = {sum:.12} (expected 1.0)"
        );
        assert!(result.scores.values().all(|r| (0.0..=1.0).contains(r)));
    }
}

#[test]
fn sampling_agrees_with_iteration_random_graphs() {
    let params = RandomGraphParams {
        pages: 8,
        max_links: 3,
    };
    let config = default_config();

    for seed in 0..10_u64 {
        let graph = random_graph(seed, &params);
        let iterated = iterate_pagerank(&graph, &config).expect("converges");
        let sampled = sample_pagerank_seeded(&graph, &config, seed ^ 0xABCD).expect("sample");

        assert!((sampled.total() - 1.0).abs() < SUM_EPSILON);
        let diff = sampled.max_abs_diff(&iterated);
        assert!(
            diff < AGREEMENT,
            "seed={seed}: estimators disagree by {diff:.4}"
        );
    }
}

#[test]
fn fixed_point_is_idempotent() {
    let params = RandomGraphParams {
        pages: 25,
        max_links: 4,
    };
    let config = default_config();

    for seed in 0..10_u64 {
        assert_extra_sweep_within_threshold(&random_graph(seed, &params), &config, seed);
    }
}

#[test]
fn fixed_point_is_idempotent_with_hubs() {
    let config = default_config();

    for seed in 0..200_u64 {
        let pages = 2 + usize::try_from(seed % 39).expect("fits in usize");
        assert_extra_sweep_within_threshold(&hub_graph(seed, pages), &config, seed);
    }
}

fn assert_extra_sweep_within_threshold(graph: &LinkGraph, config: &RankConfig, seed: u64) {
    let result = iterate_pagerank(graph, config).expect("converges");
    let again = iterate_sweep(graph, &result.scores, config).expect("sweep");

    for (page, rank) in &result.scores {
        let delta = (again[page] - rank).abs();
        assert!(
            delta <= config.threshold,
            "seed={seed}: {page} moved by {delta} after converging"
        );
    }
}

#[test]
fn iteration_is_deterministic() {
    let graph = random_graph(
        99,
        &RandomGraphParams {
            pages: 30,
            max_links: 6,
        },
    );
    let a = iterate_pagerank(&graph, &default_config()).expect("converges");
    let b = iterate_pagerank(&graph, &default_config()).expect("converges");
    assert_eq!(a, b);
    assert_eq!(a.method, RankMethod::Iteration);
}

#[test]
fn tighter_threshold_needs_more_sweeps() {
    let graph = random_graph(
        3,
        &RandomGraphParams {
            pages: 30,
            max_links: 4,
        },
    );
    let loose = iterate_pagerank(&graph, &default_config()).expect("converges");
    let tight = iterate_pagerank(
        &graph,
        &RankConfig {
            threshold: 1e-10,
            ..default_config()
        },
    )
    .expect("converges");
    assert!(tight.steps >= loose.steps);
    assert!(tight.max_abs_diff(&loose) < 0.01);
}

// ---------------------------------------------------------------------------
// Sink handling
// ---------------------------------------------------------------------------

#[test]
fn drop_policy_diverges_from_sampling_on_sinks() {
    let graph = three_page_graph();
    let dropped = iterate_pagerank(
        &graph,
        &RankConfig {
            sink_policy: SinkPolicy::Drop,
            ..default_config()
        },
    )
    .expect("converges");
    let sampled = sample_pagerank_seeded(&graph, &default_config(), 21).expect("sample");

    // Dropped sink mass leaves the ranks well short of a distribution.
    assert!(dropped.total() < 0.5, "total = {}", dropped.total());
    assert!(sampled.max_abs_diff(&dropped) > AGREEMENT);
}

#[test]
fn drop_and_uniform_agree_without_sinks() {
    let graph = LinkGraph::from_links(&link_map(&[
        ("a", &["b", "c"]),
        ("b", &["c"]),
        ("c", &["a"]),
    ]))
    .expect("build graph");
    let uniform = iterate_pagerank(&graph, &default_config()).expect("converges");
    let dropped = iterate_pagerank(
        &graph,
        &RankConfig {
            sink_policy: SinkPolicy::Drop,
            ..default_config()
        },
    )
    .expect("converges");
    assert_eq!(uniform, dropped);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn invalid_parameters_rejected_before_running() {
    let graph = three_page_graph();
    for damping in [-0.1, 1.0, 1.5, f64::INFINITY] {
        let config = RankConfig {
            damping,
            ..default_config()
        };
        assert!(matches!(
            iterate_pagerank(&graph, &config),
            Err(RankError::InvalidDamping(_))
        ));
        assert!(matches!(
            sample_pagerank_seeded(&graph, &config, 1),
            Err(RankError::InvalidDamping(_))
        ));
    }
}

#[test]
fn empty_graph_is_a_named_error_for_both_estimators() {
    let graph = LinkGraph::from_links(&link_map(&[])).expect("build graph");
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        iterate_pagerank(&graph, &default_config()),
        Err(RankError::EmptyGraph)
    );
    assert_eq!(
        sample_pagerank(&graph, &default_config(), &mut rng),
        Err(RankError::EmptyGraph)
    );
}

#[test]
fn graph_is_shareable_across_threads() {
    let graph = std::sync::Arc::new(three_page_graph());
    let handles: Vec<_> = (0..4_u64)
        .map(|seed| {
            let graph = std::sync::Arc::clone(&graph);
            std::thread::spawn(move || {
                sample_pagerank_seeded(&graph, &RankConfig::default(), seed).expect("sample")
            })
        })
        .collect();
    for handle in handles {
        let result = handle.join().expect("thread completes");
        assert!((result.total() - 1.0).abs() < SUM_EPSILON);
    }
}
