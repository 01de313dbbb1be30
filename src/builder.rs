use crate::canopy::Canopy;
use crate::discovery::discover;
use crate::errors::CanopyError;
use crate::logger::{Logger, NullLogger};
use crate::merger::merge;
use crate::point::Point;
use crate::types::Result;
use crate::util::check_argument;

/// Convenient mechanism for configuring and running a canopy-clustering pass.
///
/// Radii are highly interdependent (`r_close > r_canopy >= r_merge`), so this
/// builder validates them at `build()` time rather than leaving the caller
/// to discover a bad combination via an internal assertion mid-run.
///
/// The builder has no required parameters: every field has a reasonable
/// default.
///
/// # Examples
///
/// ```
/// use canopy_clustering::{CanopyClusteringBuilder, Point};
///
/// let points = vec![
///     Point::from_samples("a", vec![1.0, 2.0, 3.0]),
///     Point::from_samples("b", vec![2.0, 4.0, 6.0]),
/// ];
/// let canopies = CanopyClusteringBuilder::new().workers(2).build(&points).unwrap();
/// assert_eq!(canopies.len(), 1);
/// ```
pub struct CanopyClusteringBuilder {
    r_canopy: f64,
    r_close: f64,
    r_merge: f64,
    r_step: f64,
    workers: usize,
    shuffle_seed: Option<u64>,
    logger: Box<dyn Logger>,
}

impl Default for CanopyClusteringBuilder {
    fn default() -> Self {
        CanopyClusteringBuilder {
            r_canopy: 0.1,
            r_close: 0.4,
            r_merge: 0.03,
            r_step: 0.1,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            shuffle_seed: None,
            logger: Box::new(NullLogger),
        }
    }
}

impl CanopyClusteringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the membership radius (default 0.1).
    pub fn r_canopy(mut self, r_canopy: f64) -> Self {
        self.r_canopy = r_canopy;
        self
    }

    /// Set the close-set radius (default 0.4).
    pub fn r_close(mut self, r_close: f64) -> Self {
        self.r_close = r_close;
        self
    }

    /// Set the merge radius (default 0.03).
    pub fn r_merge(mut self, r_merge: f64) -> Self {
        self.r_merge = r_merge;
        self
    }

    /// Set the walk-stable threshold (default 0.1).
    pub fn r_step(mut self, r_step: f64) -> Self {
        self.r_step = r_step;
        self
    }

    /// Set the discovery worker count (default: available parallelism).
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Seed an optional pre-discovery shuffle of dispatch order. Unset by
    /// default, which processes origins in input order.
    pub fn shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Install a logger handle. Defaults to `NullLogger`.
    pub fn logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Runs discovery followed by the merge pass using the configured
    /// parameters. Filters are not applied here; call the `filters` module
    /// functions on the result if needed.
    ///
    /// # Errors
    ///
    /// Returns `CanopyError::InvalidArgument` if `workers == 0` or the radii
    /// do not satisfy `r_close > r_canopy >= r_merge` and `r_step > 0`.
    pub fn build(self, points: &[Point]) -> Result<Vec<Canopy>> {
        check_argument(self.workers > 0, "workers must be positive")?;
        check_argument(self.r_close > self.r_canopy, "r_close must exceed r_canopy")?;
        check_argument(self.r_canopy >= self.r_merge, "r_canopy must be at least r_merge")?;
        check_argument(self.r_step > 0.0, "r_step must be positive")?;

        if points.is_empty() {
            return Ok(Vec::new());
        }

        let raw = discover(
            points,
            self.r_canopy,
            self.r_close,
            self.r_step,
            self.workers,
            self.shuffle_seed,
            self.logger.as_ref(),
        );
        Ok(merge(raw, self.r_merge, points, self.logger.as_ref()))
    }
}
