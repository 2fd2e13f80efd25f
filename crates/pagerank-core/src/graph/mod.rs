//! Hyperlink graph consumed by both estimators.
//!
//! ## Pipeline
//!
//! ```text
//! HashMap<page, set of linked pages>
//!        ↓  build::LinkGraph::from_links()
//! LinkGraph (DiGraph, pages in sorted order)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (sinks, density, components, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use pagerank_core::graph::{LinkGraph, GraphStats, link_map};
//!
//! let graph = LinkGraph::from_links(&link_map(&[
//!     ("1.html", &["2.html"]),
//!     ("2.html", &["1.html", "3.html"]),
//!     ("3.html", &[]),
//! ]))?;
//! let stats = GraphStats::from_graph(&graph);
//! assert_eq!(stats.sink_count, 1);
//! # Ok::<(), pagerank_core::RankError>(())
//! ```

pub mod build;
pub mod stats;

pub use build::{LinkGraph, link_map};
pub use stats::GraphStats;
