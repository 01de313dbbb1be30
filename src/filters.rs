use crate::canopy::Canopy;
use crate::logger::{Level, Logger};
use crate::point::Point;
use crate::predicates::{max_share_below, non_zero_count_at_least, top3_share_below};

/// Drops canopies whose center fails to have at least `min_non_zero`
/// components above the non-zero threshold.
pub fn filter_by_sparsity(
    mut canopies: Vec<Canopy>,
    min_non_zero: usize,
    pool: &[Point],
    logger: &dyn Logger,
) -> Vec<Canopy> {
    let before = canopies.len();
    canopies.retain(|c| non_zero_count_at_least(c.center_point(pool), min_non_zero));
    logger.log(
        Level::Info,
        &format!("sparsity filter: {} of {} canopies kept", canopies.len(), before),
    );
    canopies
}

/// Drops canopies whose center's single largest component dominates the
/// total mass (`max / sum >= max_share`).
pub fn filter_by_max_share(
    mut canopies: Vec<Canopy>,
    max_share: f64,
    pool: &[Point],
    logger: &dyn Logger,
) -> Vec<Canopy> {
    let before = canopies.len();
    canopies.retain(|c| max_share_below(c.center_point(pool), max_share));
    logger.log(
        Level::Info,
        &format!("max-share filter: {} of {} canopies kept", canopies.len(), before),
    );
    canopies
}

/// Drops canopies whose center's three largest components together dominate
/// the total mass (`top3 / sum >= top3_share`).
pub fn filter_by_top3_share(
    mut canopies: Vec<Canopy>,
    top3_share: f64,
    pool: &[Point],
    logger: &dyn Logger,
) -> Vec<Canopy> {
    let before = canopies.len();
    canopies.retain(|c| top3_share_below(c.center_point(pool), top3_share));
    logger.log(
        Level::Info,
        &format!("top3-share filter: {} of {} canopies kept", canopies.len(), before),
    );
    canopies
}
