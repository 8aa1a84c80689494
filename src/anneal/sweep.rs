//! Independent runs over one shared distance source.
//!
//! Runs share nothing mutable: each owns its random source and state, and the
//! distance source is only read. With the `parallel` feature the runs are
//! spread over the rayon thread pool; otherwise they execute in order.

use super::config::RunConfig;
use super::runner::{anneal, AnnealResult};
use crate::distance::Distances;
use crate::error::Result;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs every configuration against `distances`.
///
/// Results are returned in the order of `configs`. An invalid configuration
/// fails only its own slot.
pub fn run_many<D: Distances>(distances: &D, configs: &[RunConfig]) -> Vec<Result<AnnealResult>> {
    log::debug!("anneal.sweep: runs={}", configs.len());

    #[cfg(feature = "parallel")]
    let results: Vec<Result<AnnealResult>> = configs
        .par_iter()
        .map(|config| anneal(distances, config.clone()))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<AnnealResult>> = configs
        .iter()
        .map(|config| anneal(distances, config.clone()))
        .collect();

    results
}

/// Repeats `base` once per seed.
pub fn run_seeds<D, I>(distances: &D, base: &RunConfig, seeds: I) -> Vec<Result<AnnealResult>>
where
    D: Distances,
    I: IntoIterator<Item = u64>,
{
    let configs: Vec<RunConfig> = seeds
        .into_iter()
        .map(|seed| base.clone().with_seed(seed))
        .collect();
    run_many(distances, &configs)
}
