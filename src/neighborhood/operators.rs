//! Built-in neighborhood operators.

use super::{Candidate, Move, Neighborhood};
use crate::distance::Distances;
use crate::Tour;
use rand::{Rng, RngCore};

/// Two distinct positions `i < j`, uniform over all pairs.
///
/// Callers guarantee `n >= 2`.
fn distinct_positions<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

fn ordered((a, b): (usize, usize)) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A do-nothing candidate for tours too small to perturb.
fn stay() -> Candidate {
    Candidate {
        mv: Move::Reverse { i: 0, j: 0 },
        delta: 0.0,
    }
}

/// Segment reversal (2-opt).
///
/// # Reference
///
/// Croes, G.A. (1958). "A method for solving traveling salesman problems",
/// *Operations Research* 6(6), 791-812.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl Neighborhood for TwoOpt {
    fn propose(&self, tour: &Tour, distances: &dyn Distances, rng: &mut dyn RngCore) -> Candidate {
        if tour.len() < 2 {
            return stay();
        }
        let (i, j) = ordered(distinct_positions(tour.len(), rng));
        Candidate::evaluate(Move::Reverse { i, j }, tour, distances)
    }
}

/// Pairwise exchange of two cities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swap;

impl Neighborhood for Swap {
    fn propose(&self, tour: &Tour, distances: &dyn Distances, rng: &mut dyn RngCore) -> Candidate {
        if tour.len() < 2 {
            return stay();
        }
        let (i, j) = ordered(distinct_positions(tour.len(), rng));
        Candidate::evaluate(Move::Swap { i, j }, tour, distances)
    }
}

/// Single-city relocation (Or-opt with segment length 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Relocate;

impl Neighborhood for Relocate {
    fn propose(&self, tour: &Tour, distances: &dyn Distances, rng: &mut dyn RngCore) -> Candidate {
        if tour.len() < 2 {
            return stay();
        }
        let (from, to) = distinct_positions(tour.len(), rng);
        Candidate::evaluate(Move::Relocate { from, to }, tour, distances)
    }
}
