//! A canopy clustering engine for high-dimensional, sparse numeric profiles.
//!
//! Canopy clustering groups points into overlapping clusters ("canopies")
//! characterized by a center — a coordinate-wise median of member points —
//! and a membership radius, using a correlation-based distance. Unlike
//! k-means or hierarchical clustering, it makes a single pass over the data:
//! each worker walks from a candidate origin toward a stable center, and a
//! serial merge pass fuses canopies that end up close together.
//!
//! ```
//! use canopy_clustering::{CanopyClusteringBuilder, Point};
//!
//! // build the engine. every parameter has a default.
//! let points = vec![
//!     Point::from_samples("gene_a", vec![1.0, 2.0, 3.0]),
//!     Point::from_samples("gene_b", vec![2.0, 4.0, 6.0]),
//!     Point::from_samples("gene_c", vec![10.0, 1.0, 1.0]),
//! ];
//!
//! let canopies = CanopyClusteringBuilder::new()
//!     .workers(4)
//!     .build(&points)
//!     .unwrap();
//!
//! // gene_a and gene_b are perfectly correlated and land in one canopy;
//! // gene_c is far from both and forms its own.
//! assert_eq!(canopies.len(), 2);
//! ```
//!
//! ### References
//!
//! This engine follows the canopy clustering approach described in:
//! Andrew McCallum, Kamal Nigam, and Lyle H. Ungar. *"Efficient clustering of
//! high-dimensional data sets with application to reference matching."*
//! Proceedings of the sixth ACM SIGKDD international conference on Knowledge
//! discovery and data mining, pp. 169-178. 2000.

mod builder;
mod canopy;
mod centroid;
mod distance;
mod discovery;
mod errors;
mod filters;
mod logger;
mod merger;
mod point;
mod predicates;
mod profile_io;
mod stats;
mod types;
mod util;

pub use builder::CanopyClusteringBuilder;
pub use canopy::{Canopy, PointRef};
pub use merger::merge;
pub use centroid::build_centroid;
pub use distance::distance;
pub use errors::CanopyError;
pub use filters::{filter_by_max_share, filter_by_sparsity, filter_by_top3_share};
pub use logger::{Level, Logger, NullLogger, StderrLogger};
pub use point::Point;
pub use predicates::{max_share_below, non_zero_count_at_least, top3_share_below};
pub use profile_io::{read_profiles, write_canopies};
pub use stats::precompute_correlation_stats;
pub use types::Result;

/// Runs the full discovery-then-merge pipeline with a silent logger. Equivalent
/// to `CanopyClusteringBuilder::new()...build(points)` with all other defaults.
///
/// See `CanopyClusteringBuilder` for the configurable entry point.
pub fn run_canopy_clustering(
    points: &[Point],
    r_canopy: f64,
    r_close: f64,
    r_merge: f64,
    r_step: f64,
    workers: usize,
) -> Result<Vec<Canopy>> {
    CanopyClusteringBuilder::new()
        .r_canopy(r_canopy)
        .r_close(r_close)
        .r_merge(r_merge)
        .r_step(r_step)
        .workers(workers)
        .build(points)
}

/// As `run_canopy_clustering`, but routes discovery/merge progress through
/// `logger` instead of discarding it.
pub fn run_canopy_clustering_with_logger(
    points: &[Point],
    r_canopy: f64,
    r_close: f64,
    r_merge: f64,
    r_step: f64,
    workers: usize,
    logger: Box<dyn Logger>,
) -> Result<Vec<Canopy>> {
    CanopyClusteringBuilder::new()
        .r_canopy(r_canopy)
        .r_close(r_close)
        .r_merge(r_merge)
        .r_step(r_step)
        .workers(workers)
        .logger(logger)
        .build(points)
}
