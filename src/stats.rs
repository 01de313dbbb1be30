//! Reference implementation of the numeric collaborator named in the engine's
//! contract: `precompute_correlation_stats`. The core only ever consumes the
//! output of this function through `Point::corr_stats`; a host application
//! is free to substitute its own precomputation (streaming, incremental,
//! whatever) as long as it produces a vector with the same O(D) dot-product
//! property. This one centers on the mean and L2-normalizes the centered
//! vector, which makes `distance::distance` compute Pearson correlation as a
//! plain dot product.

const ZERO_VARIANCE_EPS: f64 = 1e-12;

/// Centers `samples` on its mean and L2-normalizes the result. A
/// (near-)constant vector has no well-defined correlation with anything, so
/// its stats collapse to all zeros: the dot product against any partner is
/// then zero, and `distance::distance` reports the maximum distance `1.0`.
pub fn precompute_correlation_stats(samples: &[f32]) -> Vec<f64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let mean: f64 = samples.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let mut centered: Vec<f64> = samples.iter().map(|&v| v as f64 - mean).collect();
    let norm = centered.iter().map(|v| v * v).sum::<f64>().sqrt();

    if norm <= ZERO_VARIANCE_EPS {
        centered.iter_mut().for_each(|v| *v = 0.0);
    } else {
        centered.iter_mut().for_each(|v| *v /= norm);
    }
    centered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_vector_collapses_to_zero() {
        let stats = precompute_correlation_stats(&[3.0, 3.0, 3.0, 3.0]);
        assert!(stats.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn unit_norm_for_varying_vector() {
        let stats = precompute_correlation_stats(&[1.0, 2.0, 3.0, 4.0]);
        let norm: f64 = stats.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_vector_yields_empty_stats() {
        assert!(precompute_correlation_stats(&[]).is_empty());
    }
}
