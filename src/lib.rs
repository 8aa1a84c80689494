//! Simulated Annealing for short closed tours over geographic points.
//!
//! The crate is built around a single-trajectory annealing engine:
//!
//! - **Distance model** ([`distance`]): planar cost between two cities, with
//!   an optional precomputed symmetric cache shared read-only across runs.
//! - **Tour** ([`Tour`]): a cyclic permutation of city indices with full and
//!   incremental length evaluation.
//! - **Neighborhood** ([`neighborhood`]): pluggable move operators (2-opt
//!   segment reversal, swap, relocation) that report an O(1) energy delta.
//! - **Cooling** ([`cooling`]): pluggable, non-increasing temperature
//!   schedules (geometric, linear, logarithmic, Lundy-Mees).
//! - **Controller** ([`anneal`]): the Metropolis accept/reject loop, best-tour
//!   tracking, termination, and independent multi-run sweeps.
//!
//! Loading and sampling cities ([`city`]) is a thin layer in front of the
//! engine; the engine itself only needs a [`distance::Distances`] source.
//!
//! # Example
//!
//! ```
//! use u_anneal::{anneal, City, RunConfig};
//! use u_anneal::distance::{DistanceMatrix, Equirectangular};
//!
//! let cities = vec![
//!     City::new("Austin, Texas", 30.267153, -97.743061),
//!     City::new("Dallas, Texas", 32.776664, -96.796988),
//!     City::new("Houston, Texas", 29.760427, -95.369803),
//!     City::new("San Antonio, Texas", 29.424122, -98.493628),
//!     City::new("El Paso, Texas", 31.761878, -106.485022),
//! ];
//! let model = Equirectangular::for_cities(&cities);
//! let dm = DistanceMatrix::from_cities(&cities, &model);
//!
//! let result = anneal(&dm, RunConfig::default().with_seed(42)).expect("valid run");
//! assert!(result.best_energy <= result.initial_energy);
//! assert_eq!(result.best.len(), cities.len());
//! ```

pub mod anneal;
pub mod city;
pub mod cooling;
pub mod distance;
pub mod error;
pub mod neighborhood;
mod tour;

pub use anneal::{anneal, AnnealResult, Annealer, Cooling, MoveStrategy, Phase, RunConfig};
pub use city::City;
pub use error::{ConfigError, Error, Result, TourError};
pub use tour::Tour;
