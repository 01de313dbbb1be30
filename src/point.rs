use crate::stats::precompute_correlation_stats;

/// Sentinel id assigned to every synthetic centroid produced by the centroid
/// builder (`centroid::build_centroid`). Never assigned to an input point.
pub const GENERATED_ID: &str = "!GENERATED!";

/// A single gene/sample profile. Immutable after construction.
///
/// `samples` holds the raw, non-negative profile values; `corr_stats` holds
/// the centered, L2-normalized form that lets `distance::distance` run in
/// O(D) via a dot product instead of recomputing a Pearson correlation from
/// scratch on every call. Populating `corr_stats` consistently with
/// `samples` is the caller's responsibility for input points; synthetic
/// centroids derive it via `Point::from_samples`.
#[derive(Clone, Debug)]
pub struct Point {
    pub id: String,
    pub samples: Vec<f32>,
    pub corr_stats: Vec<f64>,
}

impl Point {
    pub fn new(id: impl Into<String>, samples: Vec<f32>, corr_stats: Vec<f64>) -> Self {
        Point {
            id: id.into(),
            samples,
            corr_stats,
        }
    }

    /// Build a point from raw samples, deriving `corr_stats` with the
    /// crate's reference correlation-stats implementation (`stats` module).
    pub fn from_samples(id: impl Into<String>, samples: Vec<f32>) -> Self {
        let corr_stats = precompute_correlation_stats(&samples);
        Point::new(id, samples, corr_stats)
    }

    pub fn dimension(&self) -> usize {
        self.samples.len()
    }

    pub fn is_generated(&self) -> bool {
        self.id == GENERATED_ID
    }
}
