//! Error types.
//!
//! Two families of failure exist: [`ConfigError`] for run parameters that are
//! rejected before a run starts, and [`TourError`] for a tour that is not a
//! permutation of `0..n`. Both are fatal; neither is retried.

use thiserror::Error;

/// Invalid run configuration, detected before initialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial_temperature must be positive and finite, got {0}")]
    InitialTemperature(f64),

    #[error("min_temperature must be non-negative and below initial_temperature, got {0}")]
    MinTemperature(f64),

    #[error("geometric cooling factor must be in (0, 1), got {0}")]
    CoolingFactor(f64),

    #[error("linear cooling decrement must be positive, got {0}")]
    LinearDecrement(f64),

    #[error("lundy-mees beta must be positive, got {0}")]
    LundyMeesBeta(f64),

    #[error("iterations_per_temperature must be at least 1")]
    IterationsPerTemperature,

    #[error("at least 2 cities are required, got {0}")]
    TooFewCities(usize),

    #[error("cannot sample {requested} cities from a dataset of {available}")]
    SampleTooLarge { requested: usize, available: usize },
}

/// A tour that violates the permutation invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("city index {index} out of range for {size} cities")]
    OutOfRange { index: usize, size: usize },

    #[error("city index {0} appears more than once")]
    Duplicate(usize),

    #[error("tour has {actual} cities, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid tour: {0}")]
    Tour(#[from] TourError),

    #[cfg(feature = "serde")]
    #[error("dataset error: {0}")]
    Dataset(#[from] serde_json::Error),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
