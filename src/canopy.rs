use std::sync::Arc;

use crate::point::Point;
use crate::types::PointIndex;

/// A reference to a point that is either a member of the caller's input
/// pool (by stable index) or a synthetic centroid owned by the canopy that
/// produced it. This is the systems-language stand-in for the original's raw
/// pointer graph (see design notes): input points are indexed, never owned;
/// synthetic centroids are reference-counted so a centroid produced partway
/// through a walk can outlive the canopy step that produced it (it becomes
/// the next step's origin) without an explicit arena.
#[derive(Clone)]
pub enum PointRef {
    Input(PointIndex),
    Synthetic(Arc<Point>),
}

impl PointRef {
    pub fn resolve<'a>(&'a self, pool: &'a [Point]) -> &'a Point {
        match self {
            PointRef::Input(i) => &pool[*i],
            PointRef::Synthetic(p) => p.as_ref(),
        }
    }

    /// True iff this reference is a synthetic centroid (carries the
    /// `"!GENERATED!"` sentinel id).
    pub fn is_generated(&self) -> bool {
        matches!(self, PointRef::Synthetic(_))
    }

    pub fn input_index(&self) -> Option<PointIndex> {
        match self {
            PointRef::Input(i) => Some(*i),
            PointRef::Synthetic(_) => None,
        }
    }
}

/// An overlapping cluster: an `origin` point the walk started (or
/// recentered) from, a `center` (the origin itself for a singleton
/// neighborhood, otherwise a synthetic median centroid), and the `neighbors`
/// within canopy radius of the center (plus the origin, always appended).
pub struct Canopy {
    pub(crate) origin: PointRef,
    pub(crate) center: PointRef,
    pub(crate) neighbors: Vec<PointRef>,
}

impl Canopy {
    pub fn origin(&self) -> &PointRef {
        &self.origin
    }

    pub fn center(&self) -> &PointRef {
        &self.center
    }

    pub fn neighbors(&self) -> &[PointRef] {
        &self.neighbors
    }

    pub fn center_point<'a>(&'a self, pool: &'a [Point]) -> &'a Point {
        self.center.resolve(pool)
    }

    pub fn origin_point<'a>(&'a self, pool: &'a [Point]) -> &'a Point {
        self.origin.resolve(pool)
    }
}

/// Builds a canopy around `origin`.
///
/// When `recompute_close` is true, this scans the entire `pool` and fills
/// `close_scratch` with every point within `r_close` of `origin` (the set
/// reused, unscanned, by the next walk step); the neighbor set is the subset
/// within `r_canopy`. When false, it reuses `close_scratch` from the
/// previous step instead of rescanning `pool`, filtering on `r_canopy`.
///
/// `origin` is always appended to the neighbor list. It is excluded from
/// the distance scan itself (by index when it names an input point), so it
/// is counted exactly once rather than once per matching scan plus the
/// trailing append.
///
/// This deliberately departs from `examples/original_source/src/CanopyClustering.cpp:15-51`,
/// where `origin` is a member of `points` itself: it self-matches at
/// distance 0 during the scan (landing in both `close_points`/`neighbours`)
/// and is then pushed again at the unconditional `neighbours.push_back(origin)`
/// at the end, so the reference implementation double-counts origin in
/// every neighborhood of size > 0 whenever origin has non-zero variance.
/// Taken literally, that means `neighbours.size()` is almost never 1 for a
/// real (pool-indexed) origin — it directly contradicts this same file's
/// §4.D rule "if the neighbor list has size 1, center := origin" and the
/// spec's own boundary case "single point input → one canopy, center = that
/// point," since a lone point would always self-match plus get the trailing
/// append, forcing a synthetic (generated) center even for a trivial
/// one-point canopy. This crate resolves the conflict in favor of the
/// spec's explicit textual rules over the suspected reference-implementation
/// artifact; see DESIGN.md's open-question resolution 2 for the full
/// reasoning. The three quirks SPEC_FULL.md §9 explicitly flags as
/// preserve-as-is (the `!GENERATED!` no-op filter, the
/// `c1.neighbors`-vs-`final.neighbors` marking asymmetry, and the merger's
/// un-deduplicated concatenation) are unaffected and kept verbatim
/// elsewhere in this crate.
pub fn create_canopy(
    origin: PointRef,
    pool: &[Point],
    close_scratch: &mut Vec<usize>,
    r_canopy: f64,
    r_close: f64,
    recompute_close: bool,
) -> Canopy {
    use crate::distance::distance;

    let origin_point = origin.resolve(pool);
    let skip_index = origin.input_index();
    let mut neighbors = Vec::new();

    if recompute_close {
        close_scratch.clear();
        for (i, candidate) in pool.iter().enumerate() {
            if Some(i) == skip_index {
                continue;
            }
            let dist = distance(origin_point, candidate);
            if dist < r_close {
                close_scratch.push(i);
                if dist < r_canopy {
                    neighbors.push(PointRef::Input(i));
                }
            }
        }
    } else {
        for &i in close_scratch.iter() {
            if Some(i) == skip_index {
                continue;
            }
            let candidate = &pool[i];
            // close_scratch is only ever populated from `pool`, so every
            // candidate here is a real input point; the generated-id guard
            // below is a defensive no-op carried over from the original
            // (see design notes) rather than a reachable filter.
            if candidate.is_generated() {
                continue;
            }
            let dist = distance(origin_point, candidate);
            if dist < r_canopy {
                neighbors.push(PointRef::Input(i));
            }
        }
    }

    neighbors.push(origin.clone());

    let center = if neighbors.len() == 1 {
        origin.clone()
    } else {
        let neighbor_points: Vec<&Point> = neighbors.iter().map(|r| r.resolve(pool)).collect();
        PointRef::Synthetic(Arc::new(crate::centroid::build_centroid(&neighbor_points)))
    };

    Canopy {
        origin,
        center,
        neighbors,
    }
}
