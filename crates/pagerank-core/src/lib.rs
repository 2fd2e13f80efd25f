#![forbid(unsafe_code)]
//! pagerank-core library.
//!
//! Estimates the stationary distribution of a random surfer over a
//! [`graph::LinkGraph`] in two independent ways:
//!
//! - [`sampling::sample_pagerank`] walks the chain defined by
//!   [`transition::transition`] and counts visits.
//! - [`iterate::iterate_pagerank`] applies the PageRank recurrence until no
//!   page moves by more than the convergence threshold.
//!
//! ```text
//! HashMap<page, links>
//!        ↓  LinkGraph::from_links()
//! LinkGraph ──┬─ sample_pagerank()  → RankResult (visit frequency)
//!             └─ iterate_pagerank() → RankResult (fixed point)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Every fallible operation returns [`error::RankError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod iterate;
pub mod result;
pub mod sampling;
pub mod transition;

pub use config::{RankConfig, SinkPolicy};
pub use error::RankError;
pub use graph::LinkGraph;
pub use iterate::iterate_pagerank;
pub use result::{RankMethod, RankResult};
pub use sampling::{sample_pagerank, sample_pagerank_seeded};
pub use transition::{Distribution, transition};
