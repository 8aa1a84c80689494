//! Tour representation.
//!
//! A [`Tour`] is a closed cycle over city indices: a permutation of `0..n`
//! where the last position links back to position 0.

use crate::distance::Distances;
use crate::error::TourError;
use crate::neighborhood::Candidate;
use rand::seq::SliceRandom;
use rand::Rng;

/// A cyclic permutation of city indices.
///
/// Every constructor either builds a permutation by construction or
/// validates one, so a `Tour` value always upholds the invariant. The only
/// mutation path is [`apply_move`](Tour::apply_move).
///
/// # Examples
///
/// ```
/// use u_anneal::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]).expect("valid permutation");
/// assert_eq!(tour.len(), 3);
/// assert!(Tour::new(vec![0, 0, 1]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Wraps an explicit visiting order, checking that it is a permutation.
    pub fn new(order: Vec<usize>) -> Result<Self, TourError> {
        check_permutation(&order)?;
        Ok(Self { order })
    }

    /// The tour `0, 1, .., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// A uniformly random permutation of `0..n`, drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Full O(n) tour length, including the closing edge back to the start.
    ///
    /// The hot loop never calls this; it relies on move deltas instead.
    pub fn length<D: Distances + ?Sized>(&self, distances: &D) -> f64 {
        let n = self.order.len();
        if n < 2 {
            return 0.0;
        }
        let closing = distances.distance(self.order[n - 1], self.order[0]);
        self.order
            .windows(2)
            .map(|w| distances.distance(w[0], w[1]))
            .sum::<f64>()
            + closing
    }

    /// Commits an evaluated candidate and returns `energy + delta`.
    ///
    /// `energy` is the length of the tour before the move.
    ///
    /// # Panics
    ///
    /// Panics if the move's positions are out of range for this tour. Moves
    /// from [`Candidate::try_evaluate`] or a built-in operator never are.
    pub fn apply_move(&mut self, candidate: &Candidate, energy: f64) -> f64 {
        candidate.mv.apply(&mut self.order);
        debug_assert!(
            self.validate().is_ok(),
            "move {:?} broke the permutation",
            candidate.mv
        );
        energy + candidate.delta
    }

    /// Re-checks the permutation invariant.
    pub fn validate(&self) -> Result<(), TourError> {
        check_permutation(&self.order)
    }

    /// Checks that this tour covers exactly `size` cities.
    pub fn validate_for(&self, size: usize) -> Result<(), TourError> {
        if self.order.len() != size {
            return Err(TourError::SizeMismatch {
                expected: size,
                actual: self.order.len(),
            });
        }
        self.validate()
    }
}

fn check_permutation(order: &[usize]) -> Result<(), TourError> {
    let n = order.len();
    let mut seen = vec![false; n];
    for &city in order {
        if city >= n {
            return Err(TourError::OutOfRange {
                index: city,
                size: n,
            });
        }
        if seen[city] {
            return Err(TourError::Duplicate(city));
        }
        seen[city] = true;
    }
    Ok(())
}
