//! Summary statistics for a link graph.
//!
//! - **page_count** / **link_count**: nodes and edges.
//! - **sink_count**: pages with no outbound links. Their handling is where
//!   the two estimators can disagree (see [`crate::config::SinkPolicy`]).
//! - **density**: `link_count / (page_count * (page_count - 1))`, zero for
//!   graphs with fewer than two pages.
//! - **component_count**: weakly connected components.
//! - **max_in_degree** / **max_out_degree**.

use petgraph::{Direction, algo::connected_components, visit::IntoNodeIdentifiers};
use serde::Serialize;

use crate::graph::build::LinkGraph;

/// Summary statistics for a [`LinkGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub page_count: usize,
    pub link_count: usize,
    pub sink_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    #[must_use]
    pub fn from_graph(graph: &LinkGraph) -> Self {
        let g = graph.inner();
        let page_count = g.node_count();
        let link_count = g.edge_count();

        let degree = |dir: Direction| {
            g.node_identifiers()
                .map(|idx| g.neighbors_directed(idx, dir).count())
                .max()
                .unwrap_or(0)
        };

        Self {
            page_count,
            link_count,
            sink_count: graph.sinks().count(),
            density: compute_density(page_count, link_count),
            component_count: connected_components(g),
            max_in_degree: degree(Direction::Incoming),
            max_out_degree: degree(Direction::Outgoing),
        }
    }
}

fn compute_density(pages: usize, links: usize) -> f64 {
    if pages < 2 {
        return 0.0;
    }
    links as f64 / (pages as f64 * (pages - 1) as f64)
}
