//! Precomputed and on-demand edge-cost sources.

use super::{DistanceModel, Distances};
use crate::City;

/// A dense, symmetric n×n distance cache stored in row-major order.
///
/// Built once from a city list and a [`DistanceModel`]; read-only afterwards.
/// Share it by reference (or `Arc`) across independent runs.
///
/// # Examples
///
/// ```
/// use u_anneal::City;
/// use u_anneal::distance::{DistanceMatrix, Distances, Planar};
///
/// let cities = vec![
///     City::new("a", 0.0, 0.0),
///     City::new("b", 3.0, 4.0),
///     City::new("c", 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_cities(&cities, &Planar);
/// assert!((dm.distance(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes all pairwise distances. Each unordered pair is evaluated once
    /// and mirrored, so the matrix is symmetric by construction.
    pub fn from_cities<M: DistanceModel + ?Sized>(cities: &[City], model: &M) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = model.distance(&cities[i], &cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.distance(i, j) - self.distance(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl Distances for DistanceMatrix {
    fn size(&self) -> usize {
        self.size
    }

    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    fn distance(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }
}

/// Computes distances on every lookup, without a cache.
///
/// Preferable for small city counts, where an n² table buys nothing.
#[derive(Debug, Clone)]
pub struct LazyDistances<'a, M> {
    cities: &'a [City],
    model: M,
}

impl<'a, M: DistanceModel> LazyDistances<'a, M> {
    pub fn new(cities: &'a [City], model: M) -> Self {
        Self { cities, model }
    }
}

impl<M: DistanceModel> Distances for LazyDistances<'_, M> {
    fn size(&self) -> usize {
        self.cities.len()
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.model.distance(&self.cities[from], &self.cities[to])
    }
}
