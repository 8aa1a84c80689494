//! Run configuration and strategy selection.

use crate::cooling::{self, CoolingSchedule};
use crate::error::ConfigError;
use crate::neighborhood::{self, Neighborhood};
use std::time::Duration;

/// Built-in cooling schedules, selected by configuration.
///
/// Each variant builds the matching [`CoolingSchedule`] starting at the run's
/// initial temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cooling {
    /// `T0 · αᵏ`. Typical `alpha`: 0.90–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// `max(T0 − k·δ, 0)`.
    Linear { decrement: f64 },

    /// `T0 / (1 + ln(1 + k))`.
    Logarithmic,

    /// `T0 / (1 + k·β·T0)`.
    LundyMees { beta: f64 },
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling::Geometric { alpha: 0.95 }
    }
}

impl Cooling {
    pub fn schedule(&self, initial_temperature: f64) -> Box<dyn CoolingSchedule> {
        match *self {
            Cooling::Geometric { alpha } => {
                Box::new(cooling::Geometric::new(initial_temperature, alpha))
            }
            Cooling::Linear { decrement } => {
                Box::new(cooling::Linear::new(initial_temperature, decrement))
            }
            Cooling::Logarithmic => Box::new(cooling::Logarithmic::new(initial_temperature)),
            Cooling::LundyMees { beta } => {
                Box::new(cooling::LundyMees::new(initial_temperature, beta))
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Cooling::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(ConfigError::CoolingFactor(alpha));
                }
            }
            Cooling::Linear { decrement } => {
                if !(decrement > 0.0 && decrement.is_finite()) {
                    return Err(ConfigError::LinearDecrement(decrement));
                }
            }
            Cooling::LundyMees { beta } => {
                if !(beta > 0.0 && beta.is_finite()) {
                    return Err(ConfigError::LundyMeesBeta(beta));
                }
            }
            Cooling::Logarithmic => {}
        }
        Ok(())
    }
}

/// Built-in neighborhood operators, selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveStrategy {
    /// Segment reversal.
    #[default]
    TwoOpt,
    /// Pairwise exchange.
    Swap,
    /// Single-city relocation.
    Relocate,
}

impl MoveStrategy {
    pub fn operator(&self) -> Box<dyn Neighborhood> {
        match self {
            MoveStrategy::TwoOpt => Box::new(neighborhood::TwoOpt),
            MoveStrategy::Swap => Box::new(neighborhood::Swap),
            MoveStrategy::Relocate => Box::new(neighborhood::Relocate),
        }
    }
}

/// Configuration for one annealing run.
///
/// Distances are in degrees under the default planar model, so the default
/// temperatures are sized for tours spanning a few to a few hundred degrees.
///
/// # Examples
///
/// ```
/// use u_anneal::{Cooling, MoveStrategy, RunConfig};
///
/// let config = RunConfig::default()
///     .with_initial_temperature(10.0)
///     .with_min_temperature(0.001)
///     .with_cooling(Cooling::Geometric { alpha: 0.98 })
///     .with_iterations_per_temperature(50)
///     .with_moves(MoveStrategy::TwoOpt)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Initial temperature `T0`. Higher values allow more exploration.
    /// Ignored when `auto_initial_temperature` is set.
    pub initial_temperature: f64,

    /// Derive `T0` from the run instead: every move is accepted until the
    /// first uphill candidate, whose delta becomes `T0`, and the cooling
    /// schedule starts at that temperature level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub auto_initial_temperature: bool,

    /// Temperature floor. The run converges once `T` drops below it.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: Cooling,

    /// Number of candidate moves evaluated at each temperature level.
    pub iterations_per_temperature: usize,

    /// Iteration budget. The run is exhausted when the counter reaches it.
    pub max_iterations: usize,

    /// Random seed. `None` draws one from OS entropy; the seed actually used
    /// is reported in the result.
    pub seed: Option<u64>,

    /// Neighborhood move type.
    pub moves: MoveStrategy,

    /// Record a trace point every this many iterations. 0 records only the
    /// first and last points.
    pub trace_interval: usize,

    /// Recompute the energy from scratch and re-check the tour every this
    /// many iterations. 0 disables verification.
    pub verify_interval: usize,

    /// Wall-clock limit. The run is cancelled between iterations once
    /// exceeded.
    pub time_limit: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            auto_initial_temperature: false,
            min_temperature: 1e-6,
            cooling: Cooling::default(),
            iterations_per_temperature: 30,
            max_iterations: 60_000,
            seed: None,
            moves: MoveStrategy::default(),
            trace_interval: 100,
            verify_interval: 0,
            time_limit: None,
        }
    }
}

impl RunConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_auto_initial_temperature(mut self) -> Self {
        self.auto_initial_temperature = true;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: Cooling) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_moves(mut self, moves: MoveStrategy) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_trace_interval(mut self, n: usize) -> Self {
        self.trace_interval = n;
        self
    }

    pub fn with_verify_interval(mut self, n: usize) -> Self {
        self.verify_interval = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    ///
    /// With `auto_initial_temperature` the floor is only required to be
    /// finite and non-negative, since `T0` is unknown until the run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_initial_temperature {
            if !(self.min_temperature >= 0.0 && self.min_temperature.is_finite()) {
                return Err(ConfigError::MinTemperature(self.min_temperature));
            }
        } else {
            if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
                return Err(ConfigError::InitialTemperature(self.initial_temperature));
            }
            if !(self.min_temperature >= 0.0 && self.min_temperature < self.initial_temperature) {
                return Err(ConfigError::MinTemperature(self.min_temperature));
            }
        }
        if self.iterations_per_temperature == 0 {
            return Err(ConfigError::IterationsPerTemperature);
        }
        self.cooling.validate()
    }
}
