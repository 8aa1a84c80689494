//! Distance model and edge-cost sources.
//!
//! - [`DistanceModel`]: a pure cost function over two [`City`](crate::City)
//!   records ([`Planar`], [`Equirectangular`]).
//! - [`Distances`]: index-based edge lookup used by the annealing engine,
//!   served either from a precomputed [`DistanceMatrix`] or computed on
//!   demand by [`LazyDistances`].

mod matrix;
mod model;

pub use matrix::{DistanceMatrix, LazyDistances};
pub use model::{DistanceModel, Equirectangular, Planar};

/// Edge costs between city indices `0..size()`.
///
/// Implementations must be symmetric (`distance(i, j) == distance(j, i)`) and
/// return `0.0` for `distance(i, i)`. They are read-only, so one source can be
/// shared by any number of concurrent runs.
pub trait Distances: Send + Sync {
    /// Number of cities.
    fn size(&self) -> usize;

    /// Cost of the edge between cities `from` and `to`.
    fn distance(&self, from: usize, to: usize) -> f64;
}
