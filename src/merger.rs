use rayon::prelude::*;

use crate::canopy::{Canopy, PointRef};
use crate::centroid::build_centroid;
use crate::distance::distance;
use crate::logger::{Level, Logger};
use crate::point::Point;

/// Sequential merge pass (component F) over the canopies the discovery loop
/// produced. Walks the list left to right; for each surviving canopy,
/// rescans every later surviving canopy's center in parallel and merges in
/// everything within `r_merge`, concatenating neighbor lists without
/// deduplication and recomputing the center. After a merge, the pivot is
/// retested against the (now shorter) remainder before advancing, so a
/// single pivot can absorb a chain of mutually close canopies in one pass.
///
/// The pivot's `origin` is retained across merges: a merge replaces `center`
/// and extends `neighbors`, it does not relocate where the walk started.
pub fn merge(mut canopies: Vec<Canopy>, r_merge: f64, pool: &[Point], logger: &dyn Logger) -> Vec<Canopy> {
    let mut merged_count = 0usize;
    let mut i = 0;
    while i < canopies.len() {
        loop {
            let pivot_center = canopies[i].center_point(pool).clone();
            let hits: Vec<usize> = canopies[i + 1..]
                .par_iter()
                .enumerate()
                .filter_map(|(offset, candidate)| {
                    if distance(&pivot_center, candidate.center_point(pool)) < r_merge {
                        Some(i + 1 + offset)
                    } else {
                        None
                    }
                })
                .collect();

            if hits.is_empty() {
                break;
            }

            // remove back-to-front so earlier indices in `hits` stay valid
            let mut absorbed: Vec<Canopy> = Vec::with_capacity(hits.len());
            for &idx in hits.iter().rev() {
                absorbed.push(canopies.remove(idx));
            }
            merged_count += absorbed.len();

            let pivot = &mut canopies[i];
            for mut other in absorbed {
                pivot.neighbors.append(&mut other.neighbors);
            }

            let neighbor_points: Vec<&Point> =
                pivot.neighbors.iter().map(|r| r.resolve(pool)).collect();
            pivot.center = PointRef::Synthetic(std::sync::Arc::new(build_centroid(&neighbor_points)));
        }
        i += 1;
    }

    logger.log(
        Level::Info,
        &format!(
            "merge complete: {} canopies remain, {} absorbed",
            canopies.len(),
            merged_count
        ),
    );
    canopies
}
