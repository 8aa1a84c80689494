//! Simulated Annealing controller.
//!
//! Each iteration draws a candidate move, evaluates its energy delta, and
//! applies the Metropolis criterion at the temperature given by the cooling
//! schedule. The run stops when the iteration budget is spent (`Exhausted`),
//! the temperature drops below the floor (`Converged`), or it is cancelled.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod acceptance;
mod config;
mod runner;
mod sweep;

pub use acceptance::{acceptance_probability, metropolis};
pub use config::{Cooling, MoveStrategy, RunConfig};
pub use runner::{anneal, AnnealResult, Annealer, AnnealingState, Phase, Step, TracePoint};
pub use sweep::{run_many, run_seeds};
