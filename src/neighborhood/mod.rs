//! Neighborhood operators.
//!
//! An operator draws one candidate [`Move`] per call from the caller's random
//! source and reports its energy delta without touching the tour. The
//! controller decides whether to commit it.
//!
//! | Operator     | Move                         | Delta cost          |
//! |--------------|------------------------------|---------------------|
//! | [`TwoOpt`]   | reverse a segment            | O(1), 4 edges       |
//! | [`Swap`]     | exchange two cities          | O(1), up to 8 edges |
//! | [`Relocate`] | move one city elsewhere      | O(1), 6 edges       |

mod moves;
mod operators;

pub use moves::Move;
pub use operators::{Relocate, Swap, TwoOpt};

use crate::distance::Distances;
use crate::error::TourError;
use crate::Tour;
use rand::RngCore;

/// A proposed move together with the energy change it would cause.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub mv: Move,
    /// `length(after) - length(before)`.
    pub delta: f64,
}

impl Candidate {
    /// Evaluates `mv` against the current tour.
    ///
    /// Operators call this with positions drawn from `0..tour.len()`. Moves
    /// built elsewhere should go through [`try_evaluate`](Candidate::try_evaluate).
    ///
    /// # Panics
    ///
    /// Panics if a position of `mv` is out of range for `tour`.
    pub fn evaluate<D: Distances + ?Sized>(mv: Move, tour: &Tour, distances: &D) -> Self {
        Self {
            mv,
            delta: mv.delta(tour.order(), distances),
        }
    }

    /// Bounds-checked [`evaluate`](Candidate::evaluate).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_anneal::{City, Tour, TourError};
    /// use u_anneal::distance::{DistanceMatrix, Planar};
    /// use u_anneal::neighborhood::{Candidate, Move};
    ///
    /// let cities: Vec<City> = (0..4)
    ///     .map(|k| City::new(format!("{k}"), k as f64, 0.0))
    ///     .collect();
    /// let dm = DistanceMatrix::from_cities(&cities, &Planar);
    /// let tour = Tour::identity(4);
    ///
    /// let err = Candidate::try_evaluate(Move::Reverse { i: 1, j: 9 }, &tour, &dm);
    /// assert_eq!(err, Err(TourError::OutOfRange { index: 9, size: 4 }));
    /// assert!(Candidate::try_evaluate(Move::Swap { i: 0, j: 3 }, &tour, &dm).is_ok());
    /// ```
    pub fn try_evaluate<D: Distances + ?Sized>(
        mv: Move,
        tour: &Tour,
        distances: &D,
    ) -> Result<Self, TourError> {
        mv.check(tour.len())?;
        Ok(Self::evaluate(mv, tour, distances))
    }
}

/// Generates candidate moves.
///
/// Implementations must draw all randomness from `rng` so that a seeded run
/// can be replayed exactly.
pub trait Neighborhood: Send + Sync + std::fmt::Debug {
    /// Proposes one candidate successor of `tour`.
    fn propose(&self, tour: &Tour, distances: &dyn Distances, rng: &mut dyn RngCore) -> Candidate;
}
