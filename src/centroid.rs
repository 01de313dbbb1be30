use crate::point::{Point, GENERATED_ID};
use crate::stats::precompute_correlation_stats;

/// Builds the synthetic centroid of a non-empty set of points: a fresh point
/// whose `samples[i]` is the coordinate-wise median of the inputs' i-th
/// component, with `corr_stats` recomputed from those medians.
///
/// # Panics
///
/// If `points` is empty. Centroids are only ever built from a canopy's
/// neighbor list, which always contains at least the origin.
pub fn build_centroid(points: &[&Point]) -> Point {
    assert!(
        !points.is_empty(),
        "cannot build a centroid from an empty neighbor set"
    );
    let dimension = points[0].samples.len();
    let mut samples = vec![0.0f32; dimension];
    let mut column = Vec::with_capacity(points.len());
    for i in 0..dimension {
        column.clear();
        column.extend(points.iter().map(|p| p.samples[i]));
        samples[i] = median(&mut column);
    }
    let corr_stats = precompute_correlation_stats(&samples);
    Point::new(GENERATED_ID, samples, corr_stats)
}

/// `n` odd: the middle element of the sorted values. `n` even: the average
/// of the two middle elements (the standard even-length median).
fn median(values: &mut [f32]) -> f32 {
    let n = values.len();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    if n % 2 == 1 {
        values[(n - 1) / 2]
    } else {
        let hi = n / 2;
        (values[hi] + values[hi - 1]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_count_picks_middle_value() {
        let a = Point::from_samples("a", vec![1.0, 10.0]);
        let b = Point::from_samples("b", vec![2.0, 20.0]);
        let c = Point::from_samples("c", vec![3.0, 30.0]);
        let centroid = build_centroid(&[&a, &b, &c]);
        assert_eq!(centroid.samples, vec![2.0, 20.0]);
        assert_eq!(centroid.id, GENERATED_ID);
    }

    #[test]
    fn even_count_averages_middle_two() {
        let a = Point::from_samples("a", vec![1.0]);
        let b = Point::from_samples("b", vec![2.0]);
        let c = Point::from_samples("c", vec![3.0]);
        let d = Point::from_samples("d", vec![4.0]);
        let centroid = build_centroid(&[&a, &b, &c, &d]);
        assert_eq!(centroid.samples, vec![2.5]);
    }

    #[test]
    fn single_point_centroid_equals_itself() {
        let a = Point::from_samples("a", vec![5.0, 6.0]);
        let centroid = build_centroid(&[&a]);
        assert_eq!(centroid.samples, a.samples);
    }

    #[test]
    #[should_panic(expected = "empty neighbor set")]
    fn empty_input_panics() {
        build_centroid(&[]);
    }
}
