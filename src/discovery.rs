use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::ThreadPoolBuilder;

use crate::canopy::{create_canopy, Canopy, PointRef};
use crate::distance::distance;
use crate::logger::{Level, Logger};
use crate::point::Point;

/// State touched by the commit critical section: the monotonically-growing
/// marked set and the canopy list it guards. Read-checked and written
/// together so no worker can observe a partially-committed walk.
struct Shared {
    marked: Vec<bool>,
    canopies: Vec<Canopy>,
}

/// Runs the parallel canopy-discovery loop (component E) over `points`.
///
/// For each unmarked origin, walks a sequence of recentered canopies until
/// consecutive centers settle within `r_step`, then commits the
/// better-populated of the last two candidates, marking the origin and the
/// penultimate canopy's neighbors as claimed. See `lib::run_canopy_clustering`
/// for the full pipeline this feeds into.
///
/// Dispatch runs as one long-lived loop per worker thread (via
/// `rayon::ThreadPool::broadcast`) pulling origins off a shared atomic
/// cursor, rather than one `rayon` task per origin: that keeps the `close`
/// scratch buffer allocated once per worker and reused across every origin
/// it processes, instead of once per origin.
///
/// `shuffle_seed`, if set, randomizes only the *order* origins are
/// dispatched in, not their identity: returned `PointRef::Input` indices
/// always refer to the caller's original `points` slice.
///
/// # Panics
///
/// If `workers` is zero or the worker pool fails to start.
pub fn discover(
    points: &[Point],
    r_canopy: f64,
    r_close: f64,
    r_step: f64,
    workers: usize,
    shuffle_seed: Option<u64>,
    logger: &dyn Logger,
) -> Vec<Canopy> {
    assert!(workers > 0, "workers must be positive");
    if points.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    if let Some(seed) = shuffle_seed {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        order.shuffle(&mut rng);
    }

    let shared = Mutex::new(Shared {
        marked: vec![false; points.len()],
        canopies: Vec::new(),
    });
    let jumps = AtomicU64::new(0);
    let cursor = AtomicUsize::new(0);

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("failed to start discovery worker pool");

    // Each broadcast participant is one long-lived worker loop rather than a
    // one-shot task body: `close` is allocated once per worker and reused
    // across every origin that worker dequeues, per §5's "thread-local
    // scratch buffer, preallocated to |pool|, reused across iterations."
    // `cursor` is the dynamic work queue — each worker claims the next
    // not-yet-dispatched slot in `order` as soon as it's free, rather than
    // statically partitioning origins across workers up front.
    pool.broadcast(|_ctx| {
        let mut close = Vec::with_capacity(points.len());
        loop {
            let slot = cursor.fetch_add(1, Ordering::Relaxed);
            if slot >= order.len() {
                break;
            }
            let origin_i = order[slot];

            if shared.lock().marked[origin_i] {
                continue;
            }

            let mut c1 = create_canopy(
                PointRef::Input(origin_i),
                points,
                &mut close,
                r_canopy,
                r_close,
                true,
            );
            let mut c2 = create_canopy(
                c1.center().clone(),
                points,
                &mut close,
                r_canopy,
                r_close,
                false,
            );

            while distance(c1.center_point(points), c2.center_point(points)) > r_step {
                jumps.fetch_add(1, Ordering::Relaxed);
                c1 = c2;
                c2 = create_canopy(
                    c1.center().clone(),
                    points,
                    &mut close,
                    r_canopy,
                    r_close,
                    false,
                );
            }

            let final_is_c1 = c1.neighbors().len() > c2.neighbors().len();

            let mut guard = shared.lock();
            if guard.marked[origin_i] {
                logger.log(
                    Level::Debug,
                    &format!("origin {} claimed concurrently, dropping walk", origin_i),
                );
                continue;
            }
            guard.marked[origin_i] = true;

            // §4.E note: marks c1's neighbors regardless of which canopy is
            // ultimately kept as `final` — preserved as observed, see design notes.
            for n in c1.neighbors() {
                if let Some(idx) = n.input_index() {
                    guard.marked[idx] = true;
                }
            }

            let final_origin_is_generated = if final_is_c1 {
                c1.origin().is_generated()
            } else {
                c2.origin().is_generated()
            };
            if final_origin_is_generated {
                if let Some(idx) = c1.origin().input_index() {
                    guard.marked[idx] = true;
                }
            }

            let final_canopy = if final_is_c1 { c1 } else { c2 };
            guard.canopies.push(final_canopy);
        }
    });

    let total_jumps = jumps.load(Ordering::Relaxed);
    let mut shared = shared.into_inner();
    logger.log(
        Level::Info,
        &format!(
            "discovery complete: {} canopies from {} points, {} canopy jumps",
            shared.canopies.len(),
            points.len(),
            total_jumps
        ),
    );
    std::mem::take(&mut shared.canopies)
}
