use crate::errors::CanopyError;

/// Result alias for the boundary APIs (builder validation, profile I/O) that
/// can fail. The discovery core itself never returns this: contract
/// violations there are fatal (see `errors` module doc).
pub type Result<T> = std::result::Result<T, CanopyError>;

/// Index into the caller-owned point pool. Canopies reference input points
/// by index rather than by pointer so that the marked set and neighbor lists
/// stay free of lifetime entanglement with synthetic centroids.
pub type PointIndex = usize;
