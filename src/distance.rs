use num::abs;

use crate::point::Point;

/// `distance(p, q) = 1 - |pearson_correlation(p, q)|`, computed in O(D) from
/// the precomputed, centered/normalized `corr_stats` vectors. Symmetric;
/// `distance(p, p) == 0`. If either point has zero variance, its
/// `corr_stats` is all zeros (see `stats::precompute_correlation_stats`), so
/// the dot product is zero and this returns the maximum distance `1.0`.
///
/// # Panics
///
/// If `p` and `q` have different dimension. Dimension mismatches are a
/// contract violation, not a runtime condition the core is expected to
/// recover from.
pub fn distance(p: &Point, q: &Point) -> f64 {
    assert_eq!(
        p.corr_stats.len(),
        q.corr_stats.len(),
        "dimension mismatch between points {:?} and {:?}",
        p.id,
        q.id
    );

    let mut dot = 0.0f64;
    for i in 0..p.corr_stats.len() {
        dot += p.corr_stats[i] * q.corr_stats[i];
    }
    // numerical drift can push |dot| a hair past 1.0
    1.0 - abs(dot).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn self_distance_is_zero() {
        let p = Point::from_samples("a", vec![1.0, 2.0, 3.0]);
        assert!(distance(&p, &p) < 1e-9);
    }

    #[test]
    fn perfectly_correlated_points_have_zero_distance() {
        let a = Point::from_samples("a", vec![1.0, 2.0, 3.0]);
        let b = Point::from_samples("b", vec![2.0, 4.0, 6.0]);
        assert!(distance(&a, &b) < 1e-9);
    }

    #[test]
    fn zero_vector_has_max_distance() {
        let a = Point::from_samples("a", vec![0.0, 0.0, 0.0]);
        let b = Point::from_samples("b", vec![1.0, 2.0, 3.0]);
        assert_eq!(distance(&a, &b), 1.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn mismatched_dimension_panics() {
        let a = Point::from_samples("a", vec![1.0, 2.0, 3.0]);
        let b = Point::from_samples("b", vec![1.0, 2.0]);
        distance(&a, &b);
    }
}
