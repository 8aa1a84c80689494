//! Annealing execution loop.

use super::acceptance::metropolis;
use super::config::RunConfig;
use crate::cooling::CoolingSchedule;
use crate::distance::Distances;
use crate::error::{ConfigError, Result};
use crate::neighborhood::{Candidate, Neighborhood};
use crate::Tour;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Lifecycle of a run.
///
/// Initialization happens inside [`Annealer::new`]; a constructed annealer
/// starts in `Running` and moves to exactly one terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Running,
    /// Temperature fell below the configured floor.
    Converged,
    /// Iteration budget reached.
    Exhausted,
    /// Stopped by a cancellation flag or the time limit.
    Cancelled,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::Running)
    }
}

/// Mutable search state, owned by one [`Annealer`].
#[derive(Debug, Clone)]
pub struct AnnealingState {
    pub current: Tour,
    pub current_energy: f64,
    pub best: Tour,
    pub best_energy: f64,
    /// Number of completed iterations.
    pub iteration: usize,
    /// Temperature used by the most recent iteration.
    pub temperature: f64,
}

/// One sample of the convergence trace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracePoint {
    pub iteration: usize,
    pub temperature: f64,
    pub current_energy: f64,
    pub best_energy: f64,
}

/// What a single [`Annealer::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// A candidate was drawn and either committed or discarded.
    Moved { candidate: Candidate, accepted: bool },
    /// The run is over; no candidate was drawn.
    Stopped(Phase),
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnnealResult {
    /// The best tour found.
    pub best: Tour,

    /// Length of the best tour.
    pub best_energy: f64,

    /// Length of the starting tour.
    pub initial_energy: f64,

    /// Total iterations (candidate evaluations).
    pub iterations: usize,

    /// Starting temperature of the cooling schedule. `None` when it was to
    /// be derived from the first uphill move and none was proposed.
    pub initial_temperature: Option<f64>,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Terminal phase.
    pub termination: Phase,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Seed of the run's random source.
    pub seed: u64,

    /// Convergence trace; `best_energy` is non-increasing along it.
    pub trace: Vec<TracePoint>,
}

impl AnnealResult {
    /// Initial minus best energy.
    pub fn improvement(&self) -> f64 {
        self.initial_energy - self.best_energy
    }

    /// Fraction of iterations whose candidate was accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.accepted_moves as f64 / self.iterations as f64
        }
    }
}

/// Runs simulated annealing over a tour of `distances.size()` cities.
///
/// # Examples
///
/// ```
/// use u_anneal::{anneal, City, RunConfig};
/// use u_anneal::distance::{DistanceMatrix, Planar};
///
/// let cities = vec![
///     City::new("a", 0.0, 0.0),
///     City::new("b", 0.0, 1.0),
///     City::new("c", 1.0, 1.0),
///     City::new("d", 1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_cities(&cities, &Planar);
/// let result = anneal(&dm, RunConfig::default().with_seed(7)).expect("valid run");
/// assert!((result.best_energy - 4.0).abs() < 1e-9);
/// ```
pub fn anneal<D: Distances>(distances: &D, config: RunConfig) -> Result<AnnealResult> {
    Annealer::new(distances, config)?.run()
}

/// The annealing controller.
///
/// Holds the run's random source, strategies and [`AnnealingState`]. Drive it
/// to completion with [`run`](Annealer::run), or one iteration at a time with
/// [`step`](Annealer::step).
pub struct Annealer<'a, D: Distances> {
    distances: &'a D,
    config: RunConfig,
    neighborhood: Box<dyn Neighborhood>,
    /// `None` until the first uphill move fixes `T0` in auto mode.
    schedule: Option<Box<dyn CoolingSchedule>>,
    /// Temperature level at which the schedule's step 0 begins.
    schedule_origin: usize,
    rng: StdRng,
    seed: u64,
    state: AnnealingState,
    phase: Phase,
    initial_energy: f64,
    accepted_moves: usize,
    improving_moves: usize,
    trace: Vec<TracePoint>,
    started: Instant,
}

impl<'a, D: Distances> Annealer<'a, D> {
    /// Validates `config` and initializes the run from a random tour.
    pub fn new(distances: &'a D, config: RunConfig) -> Result<Self> {
        let neighborhood = config.moves.operator();
        let schedule = Self::configured_schedule(&config);
        Self::build(distances, config, neighborhood, schedule, None)
    }

    /// Like [`new`](Annealer::new), but starts from the given tour.
    pub fn with_tour(distances: &'a D, config: RunConfig, tour: Tour) -> Result<Self> {
        let neighborhood = config.moves.operator();
        let schedule = Self::configured_schedule(&config);
        Self::build(distances, config, neighborhood, schedule, Some(tour))
    }

    /// Full control: caller-supplied operator and schedule, optional
    /// starting tour. `config.moves`, `config.cooling` and
    /// `config.auto_initial_temperature` are ignored.
    pub fn with_strategies(
        distances: &'a D,
        config: RunConfig,
        neighborhood: Box<dyn Neighborhood>,
        schedule: Box<dyn CoolingSchedule>,
        initial: Option<Tour>,
    ) -> Result<Self> {
        Self::build(distances, config, neighborhood, Some(schedule), initial)
    }

    fn configured_schedule(config: &RunConfig) -> Option<Box<dyn CoolingSchedule>> {
        if config.auto_initial_temperature {
            None
        } else {
            Some(config.cooling.schedule(config.initial_temperature))
        }
    }

    fn build(
        distances: &'a D,
        config: RunConfig,
        neighborhood: Box<dyn Neighborhood>,
        schedule: Option<Box<dyn CoolingSchedule>>,
        initial: Option<Tour>,
    ) -> Result<Self> {
        config.validate()?;
        let n = distances.size();
        if n < 2 {
            return Err(ConfigError::TooFewCities(n).into());
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let current = match initial {
            Some(tour) => {
                tour.validate_for(n)?;
                tour
            }
            None => Tour::random(n, &mut rng),
        };
        let energy = current.length(distances);
        let temperature = schedule
            .as_ref()
            .map_or(f64::INFINITY, |s| s.temperature(0));

        info!(
            "anneal: start cities={n} seed={seed} moves={:?} energy={energy:.6} t0={temperature}",
            neighborhood
        );

        let state = AnnealingState {
            best: current.clone(),
            best_energy: energy,
            current,
            current_energy: energy,
            iteration: 0,
            temperature,
        };
        let trace = vec![TracePoint {
            iteration: 0,
            temperature,
            current_energy: energy,
            best_energy: energy,
        }];

        Ok(Self {
            distances,
            config,
            neighborhood,
            schedule,
            schedule_origin: 0,
            rng,
            seed,
            state,
            phase: Phase::Running,
            initial_energy: energy,
            accepted_moves: 0,
            improving_moves: 0,
            trace,
            started: Instant::now(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &AnnealingState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Starting temperature of the cooling schedule, once known.
    pub fn initial_temperature(&self) -> Option<f64> {
        self.schedule.as_ref().map(|s| s.temperature(0))
    }

    fn temperature_at(&self, iteration: usize) -> f64 {
        let level = iteration / self.config.iterations_per_temperature;
        match &self.schedule {
            Some(schedule) => schedule.temperature(level.saturating_sub(self.schedule_origin)),
            None => f64::INFINITY,
        }
    }

    /// Fixes `T0` at the first uphill delta; the schedule starts at the
    /// current temperature level.
    fn calibrate(&mut self, delta: f64) -> f64 {
        self.schedule = Some(self.config.cooling.schedule(delta));
        self.schedule_origin = self.state.iteration / self.config.iterations_per_temperature;
        self.state.temperature = delta;
        debug!(
            "anneal: t0={delta:.6e} from first uphill move at iteration={}",
            self.state.iteration
        );
        delta
    }

    /// Performs one iteration, or reports the terminal phase.
    ///
    /// Each call either fully commits or fully discards its candidate, so
    /// stopping between calls never leaves the state inconsistent.
    pub fn step(&mut self) -> Result<Step> {
        if self.phase.is_terminal() {
            return Ok(Step::Stopped(self.phase));
        }

        if self.state.iteration >= self.config.max_iterations {
            return Ok(Step::Stopped(self.finish(Phase::Exhausted)));
        }
        let temperature = self.temperature_at(self.state.iteration);
        if temperature < self.config.min_temperature {
            return Ok(Step::Stopped(self.finish(Phase::Converged)));
        }
        if let Some(limit) = self.config.time_limit {
            if self.started.elapsed() >= limit {
                return Ok(Step::Stopped(self.finish(Phase::Cancelled)));
            }
        }

        if temperature != self.state.temperature {
            trace!(
                "anneal: iteration={} temperature={temperature:.6e} current={:.6} best={:.6}",
                self.state.iteration,
                self.state.current_energy,
                self.state.best_energy
            );
        }
        self.state.temperature = temperature;

        let candidate =
            self.neighborhood
                .propose(&self.state.current, self.distances, &mut self.rng);
        let temperature =
            if self.schedule.is_none() && candidate.delta > 0.0 && candidate.delta.is_finite() {
                self.calibrate(candidate.delta)
            } else {
                temperature
            };
        let accepted = metropolis(candidate.delta, temperature, &mut self.rng);

        if accepted {
            if candidate.delta < 0.0 {
                self.improving_moves += 1;
            }
            self.accepted_moves += 1;
            self.state.current_energy = self
                .state
                .current
                .apply_move(&candidate, self.state.current_energy);

            if self.state.current_energy < self.state.best_energy {
                self.state.best = self.state.current.clone();
                self.state.best_energy = self.state.current_energy;
            }
        }

        self.state.iteration += 1;

        let iteration = self.state.iteration;
        if self.config.verify_interval > 0 && iteration % self.config.verify_interval == 0 {
            self.verify()?;
        }
        if self.config.trace_interval > 0 && iteration % self.config.trace_interval == 0 {
            self.record();
        }

        Ok(Step::Moved {
            candidate,
            accepted,
        })
    }

    /// Recomputes the current energy from scratch and re-checks the tour.
    fn verify(&mut self) -> Result<()> {
        self.state.current.validate_for(self.distances.size())?;
        let exact = self.state.current.length(self.distances);
        if drifted(exact, self.state.current_energy) {
            debug!(
                "anneal: resync iteration={} drift={:.3e}",
                self.state.iteration,
                exact - self.state.current_energy
            );
        }
        self.state.current_energy = exact;
        if exact < self.state.best_energy {
            self.state.best = self.state.current.clone();
            self.state.best_energy = exact;
        }
        Ok(())
    }

    fn record(&mut self) {
        self.trace.push(TracePoint {
            iteration: self.state.iteration,
            temperature: self.state.temperature,
            current_energy: self.state.current_energy,
            best_energy: self.state.best_energy,
        });
    }

    fn finish(&mut self, phase: Phase) -> Phase {
        self.phase = phase;
        self.state.temperature = self.temperature_at(self.state.iteration);
        if self
            .trace
            .last()
            .is_none_or(|p| p.iteration != self.state.iteration)
        {
            self.record();
        }
        info!(
            "anneal: {phase:?} iterations={} accepted={} best={:.6} initial={:.6} elapsed={:?}",
            self.state.iteration,
            self.accepted_moves,
            self.state.best_energy,
            self.initial_energy,
            self.started.elapsed()
        );
        phase
    }

    /// Runs to a terminal phase.
    pub fn run(self) -> Result<AnnealResult> {
        self.run_with_cancel(None)
    }

    /// Runs to a terminal phase, checking `cancel` between iterations.
    pub fn run_with_cancel(mut self, cancel: Option<Arc<AtomicBool>>) -> Result<AnnealResult> {
        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    self.finish(Phase::Cancelled);
                    break;
                }
            }
            if let Step::Stopped(_) = self.step()? {
                break;
            }
        }
        Ok(self.into_result())
    }

    /// Snapshot of the best solution so far.
    ///
    /// Valid at any point; a run that is still `Running` reports
    /// `Phase::Running` as its termination.
    pub fn into_result(self) -> AnnealResult {
        let initial_temperature = self.initial_temperature();
        AnnealResult {
            best: self.state.best,
            best_energy: self.state.best_energy,
            initial_energy: self.initial_energy,
            iterations: self.state.iteration,
            initial_temperature,
            final_temperature: self.state.temperature,
            termination: self.phase,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            seed: self.seed,
            trace: self.trace,
        }
    }
}

/// Whether the incrementally tracked energy is off from the exact length by
/// more than accumulated rounding.
fn drifted(exact: f64, tracked: f64) -> bool {
    (exact - tracked).abs() > 1e-9 * exact.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::{Cooling, MoveStrategy};
    use crate::distance::{DistanceMatrix, Planar};
    use crate::error::{Error, TourError};
    use crate::City;
    use rand::Rng;

    fn unit_square() -> DistanceMatrix {
        let cities = vec![
            City::new("a", 0.0, 0.0),
            City::new("b", 0.0, 1.0),
            City::new("c", 1.0, 1.0),
            City::new("d", 1.0, 0.0),
        ];
        DistanceMatrix::from_cities(&cities, &Planar)
    }

    fn random_cities(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let cities: Vec<City> = (0..n)
            .map(|k| {
                City::new(
                    format!("{k}"),
                    rng.random_range(25.0..49.0),
                    rng.random_range(-124.0..-67.0),
                )
            })
            .collect();
        DistanceMatrix::from_cities(&cities, &Planar)
    }

    fn slow_config(seed: u64) -> RunConfig {
        RunConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(1e-3)
            .with_cooling(Cooling::Geometric { alpha: 0.95 })
            .with_iterations_per_temperature(20)
            .with_max_iterations(10_000)
            .with_seed(seed)
    }

    #[test]
    fn test_unit_square_converges_to_perimeter() {
        let dm = unit_square();
        for seed in 0..20 {
            let result = anneal(&dm, slow_config(seed)).expect("valid run");
            assert!(
                (result.best_energy - 4.0).abs() < 1e-9,
                "seed {seed}: best {}",
                result.best_energy
            );
            assert!(result.best.validate_for(4).is_ok());
        }
    }

    #[test]
    fn test_every_move_strategy_improves() {
        let dm = random_cities(40, 1);
        for moves in [MoveStrategy::TwoOpt, MoveStrategy::Swap, MoveStrategy::Relocate] {
            let config = RunConfig::default()
                .with_initial_temperature(20.0)
                .with_min_temperature(1e-3)
                .with_moves(moves)
                .with_max_iterations(200_000)
                .with_seed(42);
            let result = anneal(&dm, config).expect("valid run");
            assert!(
                result.best_energy < result.initial_energy,
                "{moves:?} did not improve"
            );
            assert!((result.best.length(&dm) - result.best_energy).abs() < 1e-6);
            assert!(result.improvement() > 0.0);
        }
    }

    #[test]
    fn test_two_opt_beats_swap_on_average() {
        let dm = random_cities(60, 9);
        let mean = |moves| {
            (0..4)
                .map(|seed| {
                    let config = RunConfig::default()
                        .with_initial_temperature(20.0)
                        .with_min_temperature(1e-3)
                        .with_iterations_per_temperature(200)
                        .with_max_iterations(100_000)
                        .with_moves(moves)
                        .with_seed(seed);
                    anneal(&dm, config).expect("valid run").best_energy
                })
                .sum::<f64>()
                / 4.0
        };
        assert!(mean(MoveStrategy::TwoOpt) < mean(MoveStrategy::Swap));
    }

    #[test]
    fn test_two_cities() {
        let cities = vec![City::new("a", 0.0, 0.0), City::new("b", 3.0, 4.0)];
        let dm = DistanceMatrix::from_cities(&cities, &Planar);
        let result = anneal(&dm, slow_config(1)).expect("two cities are valid");
        assert!((result.best_energy - 10.0).abs() < 1e-12);
        assert!((result.initial_energy - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_city_is_config_error() {
        let cities = vec![City::new("a", 0.0, 0.0)];
        let dm = DistanceMatrix::from_cities(&cities, &Planar);
        let err = Annealer::new(&dm, slow_config(1)).err().expect("must fail");
        assert!(matches!(err, Error::Config(ConfigError::TooFewCities(1))));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let dm = unit_square();
        let config = slow_config(1).with_cooling(Cooling::Geometric { alpha: 1.0 });
        let err = anneal(&dm, config).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::CoolingFactor(_))));
    }

    #[test]
    fn test_invalid_initial_tour() {
        let dm = unit_square();
        let err = Annealer::with_tour(&dm, slow_config(1), Tour::identity(3))
            .err()
            .expect("size mismatch");
        assert!(matches!(
            err,
            Error::Tour(TourError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_exhausted_by_budget() {
        let dm = random_cities(20, 2);
        let config = slow_config(3)
            .with_min_temperature(1e-12)
            .with_max_iterations(500);
        let result = anneal(&dm, config).expect("valid run");
        assert_eq!(result.termination, Phase::Exhausted);
        assert_eq!(result.iterations, 500);
    }

    #[test]
    fn test_zero_budget_returns_initial() {
        let dm = random_cities(10, 2);
        let result = anneal(&dm, slow_config(3).with_max_iterations(0)).expect("valid run");
        assert_eq!(result.termination, Phase::Exhausted);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_energy, result.initial_energy);
    }

    #[test]
    fn test_converged_below_floor() {
        let dm = random_cities(10, 4);
        let config = RunConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.1)
            .with_cooling(Cooling::Geometric { alpha: 0.5 })
            .with_iterations_per_temperature(10)
            .with_max_iterations(1_000_000)
            .with_seed(5);
        let result = anneal(&dm, config).expect("valid run");
        assert_eq!(result.termination, Phase::Converged);
        // T(0..=3) = 1, .5, .25, .125 are above the floor; T(4) = 0.0625 is not.
        assert_eq!(result.iterations, 40);
        assert!(result.final_temperature < 0.1);
    }

    #[test]
    fn test_cancellation() {
        let dm = random_cities(10, 5);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = Annealer::new(&dm, slow_config(1))
            .expect("valid")
            .run_with_cancel(Some(cancel))
            .expect("valid run");
        assert_eq!(result.termination, Phase::Cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_time_limit_cancels() {
        let dm = random_cities(10, 5);
        let config = slow_config(1)
            .with_min_temperature(0.0)
            .with_cooling(Cooling::Logarithmic)
            .with_max_iterations(usize::MAX)
            .with_time_limit(std::time::Duration::ZERO);
        let result = anneal(&dm, config).expect("valid run");
        assert_eq!(result.termination, Phase::Cancelled);
    }

    #[test]
    fn test_best_energy_non_increasing() {
        let dm = random_cities(30, 6);
        let mut annealer = Annealer::new(&dm, slow_config(8)).expect("valid");
        let mut prev = annealer.state().best_energy;
        while let Step::Moved { .. } = annealer.step().expect("step") {
            let best = annealer.state().best_energy;
            assert!(best <= prev);
            assert!(annealer.state().current_energy >= best);
            prev = best;
        }
        assert!(annealer.phase().is_terminal());
        let result = annealer.into_result();
        for w in result.trace.windows(2) {
            assert!(w[1].best_energy <= w[0].best_energy);
            assert!(w[1].iteration > w[0].iteration);
        }
    }

    #[test]
    fn test_step_after_stop_is_stable() {
        let dm = unit_square();
        let config = slow_config(1).with_max_iterations(3);
        let mut annealer = Annealer::new(&dm, config).expect("valid");
        for _ in 0..3 {
            assert!(matches!(annealer.step().expect("step"), Step::Moved { .. }));
        }
        for _ in 0..3 {
            assert_eq!(annealer.step().expect("step"), Step::Stopped(Phase::Exhausted));
        }
    }

    #[test]
    fn test_deterministic_replay() {
        let dm = random_cities(25, 7);
        let record = |seed| {
            let mut annealer = Annealer::new(&dm, slow_config(seed)).expect("valid");
            let mut steps = Vec::new();
            loop {
                let step = annealer.step().expect("step");
                steps.push(step);
                if let Step::Stopped(_) = step {
                    break;
                }
            }
            (steps, annealer.into_result())
        };
        let (steps_a, a) = record(11);
        let (steps_b, b) = record(11);
        assert_eq!(steps_a, steps_b);
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_energy, b.best_energy);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.trace, b.trace);

        let (steps_c, _) = record(12);
        assert_ne!(steps_a, steps_c);
    }

    #[test]
    fn test_seed_reported() {
        let dm = unit_square();
        let result = anneal(&dm, RunConfig::default().with_max_iterations(10)).expect("valid");
        let replay = anneal(
            &dm,
            RunConfig::default()
                .with_max_iterations(10)
                .with_seed(result.seed),
        )
        .expect("valid");
        assert_eq!(result.best, replay.best);
    }

    #[test]
    fn test_verification_keeps_energy_exact() {
        let dm = random_cities(30, 10);
        let config = slow_config(2).with_verify_interval(50);
        let mut annealer = Annealer::new(&dm, config).expect("valid");
        while let Step::Moved { .. } = annealer.step().expect("step") {
            let state = annealer.state();
            if state.iteration % 50 == 0 {
                assert_eq!(state.current_energy, state.current.length(&dm));
            }
        }
    }

    #[test]
    fn test_high_temperature_accepts_most() {
        let dm = random_cities(20, 3);
        let config = RunConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling(Cooling::Geometric { alpha: 0.99 })
            .with_iterations_per_temperature(1000)
            .with_max_iterations(20_000)
            .with_seed(42);
        let result = anneal(&dm, config).expect("valid run");
        assert!(
            result.acceptance_rate() > 0.99,
            "expected near-total acceptance, got {}",
            result.acceptance_rate()
        );
    }

    #[test]
    fn test_auto_temperature_from_first_uphill() {
        let dm = random_cities(20, 12);
        let config = slow_config(4)
            .with_initial_temperature(1e6)
            .with_auto_initial_temperature();
        let mut annealer = Annealer::new(&dm, config).expect("valid");
        assert_eq!(annealer.initial_temperature(), None);

        let t0 = loop {
            match annealer.step().expect("step") {
                Step::Moved { candidate, .. } if candidate.delta > 0.0 => break candidate.delta,
                Step::Moved { accepted, .. } => {
                    assert!(accepted, "moves before the first uphill one are all taken");
                    assert_eq!(annealer.state().temperature, f64::INFINITY);
                }
                Step::Stopped(phase) => panic!("stopped before any uphill move: {phase:?}"),
            }
        };
        assert_eq!(annealer.state().temperature, t0);
        assert_eq!(annealer.initial_temperature(), Some(t0));

        let mut prev = t0;
        while let Step::Moved { .. } = annealer.step().expect("step") {
            let t = annealer.state().temperature;
            assert!(t <= prev);
            prev = t;
        }
        let result = annealer.into_result();
        assert_eq!(result.initial_temperature, Some(t0));
        assert!(result.final_temperature <= t0);
    }

    #[test]
    fn test_auto_temperature_schedule_starts_at_calibration_level() {
        let dm = random_cities(20, 13);
        let config = slow_config(6)
            .with_auto_initial_temperature()
            .with_cooling(Cooling::Geometric { alpha: 0.5 })
            .with_iterations_per_temperature(5);
        let mut annealer = Annealer::new(&dm, config).expect("valid");
        let (t0, level) = loop {
            let iteration = annealer.state().iteration;
            match annealer.step().expect("step") {
                Step::Moved { candidate, .. } if candidate.delta > 0.0 => {
                    break (candidate.delta, iteration / 5);
                }
                Step::Moved { .. } => {}
                Step::Stopped(phase) => panic!("stopped before any uphill move: {phase:?}"),
            }
        };
        // Through the first iteration of the next level.
        while annealer.state().iteration <= (level + 1) * 5 {
            assert!(matches!(annealer.step().expect("step"), Step::Moved { .. }));
        }
        assert_eq!(annealer.state().temperature, t0 * 0.5);
    }

    #[test]
    fn test_auto_temperature_without_uphill_moves() {
        let cities = vec![City::new("a", 0.0, 0.0), City::new("b", 3.0, 4.0)];
        let dm = DistanceMatrix::from_cities(&cities, &Planar);
        let config = slow_config(1)
            .with_auto_initial_temperature()
            .with_max_iterations(50);
        let result = anneal(&dm, config).expect("valid run");
        assert_eq!(result.termination, Phase::Exhausted);
        assert_eq!(result.initial_temperature, None);
        assert_eq!(result.accepted_moves, 50);
    }

    #[test]
    fn test_fixed_temperature_reported() {
        let dm = unit_square();
        let result = anneal(&dm, slow_config(1).with_max_iterations(5)).expect("valid run");
        assert_eq!(result.initial_temperature, Some(1.0));
    }

    #[test]
    fn test_drift_tolerance() {
        assert!(!drifted(100.0, 100.0));
        assert!(!drifted(100.0, 100.0 + 1e-11));
        assert!(!drifted(0.5, 0.5 + 1e-12));
        assert!(drifted(100.0, 100.001));
        assert!(drifted(0.5, 0.5 + 1e-6));
    }
}
