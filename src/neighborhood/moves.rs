//! Move primitives and their incremental cost deltas.
//!
//! All positions are indices into the tour's visiting order. Deltas assume a
//! symmetric distance source; only edges whose endpoints change are summed.

use crate::distance::Distances;
use crate::error::TourError;

/// A local perturbation of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Reverse the segment `order[i..=j]` (2-opt). `i <= j`.
    Reverse { i: usize, j: usize },

    /// Exchange the cities at positions `i` and `j`.
    Swap { i: usize, j: usize },

    /// Remove the city at position `from` and reinsert it so that it ends up
    /// at position `to`.
    Relocate { from: usize, to: usize },
}

impl Move {
    /// Checks that every position the move touches is inside a tour of
    /// `len` cities.
    pub fn check(&self, len: usize) -> Result<(), TourError> {
        let (a, b) = match *self {
            Move::Reverse { i, j } | Move::Swap { i, j } => (i, j),
            Move::Relocate { from, to } => (from, to),
        };
        match [a, b].into_iter().find(|&p| p >= len) {
            Some(index) => Err(TourError::OutOfRange { index, size: len }),
            None => Ok(()),
        }
    }

    /// Change in tour length if this move were applied to `order`.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of range for `order`; see
    /// [`check`](Move::check).
    pub fn delta<D: Distances + ?Sized>(&self, order: &[usize], distances: &D) -> f64 {
        match *self {
            Move::Reverse { i, j } => reversal_delta(order, distances, i, j),
            Move::Swap { i, j } => swap_delta(order, distances, i, j),
            Move::Relocate { from, to } => relocation_delta(order, distances, from, to),
        }
    }

    /// Applies the move in place.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of range for `order`.
    pub fn apply(&self, order: &mut [usize]) {
        match *self {
            Move::Reverse { i, j } => {
                if i < j {
                    order[i..=j].reverse();
                }
            }
            Move::Swap { i, j } => order.swap(i, j),
            Move::Relocate { from, to } => {
                if from < to {
                    order[from..=to].rotate_left(1);
                } else if to < from {
                    order[to..=from].rotate_right(1);
                }
            }
        }
    }
}

/// Two boundary edges are removed and two added; interior edges keep their
/// cost because the distances are symmetric.
fn reversal_delta<D: Distances + ?Sized>(order: &[usize], d: &D, i: usize, j: usize) -> f64 {
    let n = order.len();
    // Segments of length 0 or 1, and the whole cycle, leave the tour unchanged.
    if j <= i || j - i + 1 >= n {
        return 0.0;
    }
    let prev = order[(i + n - 1) % n];
    let next = order[(j + 1) % n];
    let (a, b) = (order[i], order[j]);
    d.distance(prev, b) + d.distance(a, next) - d.distance(prev, a) - d.distance(b, next)
}

/// Sums old and new costs over the edges touching either position. Edges are
/// indexed by their starting position; duplicates (adjacent positions, or the
/// wrap-around on tiny tours) are counted once.
fn swap_delta<D: Distances + ?Sized>(order: &[usize], d: &D, i: usize, j: usize) -> f64 {
    let n = order.len();
    if i == j || n < 2 {
        return 0.0;
    }
    let swapped = |p: usize| {
        if p == i {
            order[j]
        } else if p == j {
            order[i]
        } else {
            order[p]
        }
    };

    let mut edges = [(i + n - 1) % n, i, (j + n - 1) % n, j];
    edges.sort_unstable();

    let mut delta = 0.0;
    let mut last = None;
    for &k in &edges {
        if last == Some(k) {
            continue;
        }
        last = Some(k);
        let next = (k + 1) % n;
        delta += d.distance(swapped(k), swapped(next)) - d.distance(order[k], order[next]);
    }
    delta
}

fn relocation_delta<D: Distances + ?Sized>(order: &[usize], d: &D, from: usize, to: usize) -> f64 {
    let n = order.len();
    if from == to || n < 3 {
        return 0.0;
    }
    let city = order[from];
    let before = order[(from + n - 1) % n];
    let after = order[(from + 1) % n];

    // Neighbors of the insertion gap, read from the order with `city` removed.
    let m = n - 1;
    let reduced = |k: usize| if k < from { order[k] } else { order[k + 1] };
    let left = reduced((to + m - 1) % m);
    let right = reduced(to % m);

    d.distance(before, after) - d.distance(before, city) - d.distance(city, after)
        + d.distance(left, city)
        + d.distance(city, right)
        - d.distance(left, right)
}
