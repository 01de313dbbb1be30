use crate::point::Point;

const NON_ZERO_EPS: f64 = 1e-7;
const TOP3_EPS: f64 = 1e-10;
const SPARSITY_ZERO_SUM_EPS: f64 = 1e-10;

/// True iff at least `x` components of `p` exceed `1e-7`.
pub fn non_zero_count_at_least(p: &Point, x: usize) -> bool {
    let mut count = 0usize;
    for &v in &p.samples {
        if (v as f64) > NON_ZERO_EPS {
            count += 1;
            if count >= x {
                return true;
            }
        }
    }
    false
}

/// True iff `max(samples) / sum(samples) < x`. A point with zero total mass
/// has no well-defined share, so it fails this predicate rather than
/// dividing by zero.
pub fn max_share_below(p: &Point, x: f64) -> bool {
    let sum: f64 = p.samples.iter().map(|&v| v as f64).sum();
    if sum == 0.0 {
        return false;
    }
    let max = p.samples.iter().cloned().fold(0.0f32, f32::max) as f64;
    max / sum < x
}

/// True iff the sum of the three largest components, divided by the total,
/// is strictly less than `x - 1e-10`. Points with fewer than three samples
/// simply sum however many they have.
pub fn top3_share_below(p: &Point, x: f64) -> bool {
    let mut values: Vec<f64> = p.samples.iter().map(|&v| v as f64).collect();
    let total: f64 = values.iter().sum();
    if total <= SPARSITY_ZERO_SUM_EPS {
        return false;
    }
    values.sort_by(|a, b| b.partial_cmp(a).unwrap());
    let top3: f64 = values.iter().take(3).sum();
    (top3 / total) < (x - TOP3_EPS)
}
