//! Cooling schedules.
//!
//! A schedule maps a temperature step `k` to a temperature `T(k)`. Every
//! schedule here is a closed form, so `T(0) == T0` and `T` is non-increasing
//! in `k` by construction. The controller derives `k` from the iteration
//! counter (`k = iteration / iterations_per_temperature`).
//!
//! # References
//!
//! - Geometric: Kirkpatrick, Gelatt & Vecchi (1983)
//! - Logarithmic: Geman & Geman (1984)
//! - LundyMees: Lundy & Mees (1986), with convergence proof

/// Temperature as a function of the cooling step.
pub trait CoolingSchedule: Send + Sync + std::fmt::Debug {
    /// Temperature at step `k`. Must be non-increasing in `k`.
    fn temperature(&self, step: usize) -> f64;
}

/// `T(k) = T0 · αᵏ` with `0 < α < 1`.
///
/// # Examples
///
/// ```
/// use u_anneal::cooling::{CoolingSchedule, Geometric};
///
/// let schedule = Geometric::new(100.0, 0.5);
/// assert_eq!(schedule.temperature(0), 100.0);
/// assert_eq!(schedule.temperature(2), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometric {
    pub initial: f64,
    pub alpha: f64,
}

impl Geometric {
    pub fn new(initial: f64, alpha: f64) -> Self {
        Self { initial, alpha }
    }
}

impl CoolingSchedule for Geometric {
    fn temperature(&self, step: usize) -> f64 {
        if step == 0 {
            return self.initial;
        }
        self.initial * self.alpha.powf(step as f64)
    }
}

/// `T(k) = max(T0 − k·δ, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub initial: f64,
    pub decrement: f64,
}

impl Linear {
    pub fn new(initial: f64, decrement: f64) -> Self {
        Self { initial, decrement }
    }
}

impl CoolingSchedule for Linear {
    fn temperature(&self, step: usize) -> f64 {
        (self.initial - step as f64 * self.decrement).max(0.0)
    }
}

/// `T(k) = T0 / (1 + ln(1 + k))`.
///
/// Very slow cooling; rarely reaches a low floor within a practical budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logarithmic {
    pub initial: f64,
}

impl Logarithmic {
    pub fn new(initial: f64) -> Self {
        Self { initial }
    }
}

impl CoolingSchedule for Logarithmic {
    fn temperature(&self, step: usize) -> f64 {
        self.initial / (1.0 + (step as f64).ln_1p())
    }
}

/// Closed form of the Lundy-Mees recurrence `T ← T / (1 + βT)`:
/// `T(k) = T0 / (1 + k·β·T0)`.
///
/// Cools fast at high temperature and slowly near zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LundyMees {
    pub initial: f64,
    pub beta: f64,
}

impl LundyMees {
    pub fn new(initial: f64, beta: f64) -> Self {
        Self { initial, beta }
    }

    /// Picks `β` so that `T(steps) == t_min`.
    pub fn reaching(initial: f64, t_min: f64, steps: usize) -> Self {
        let beta = (initial - t_min) / (steps.max(1) as f64 * initial * t_min);
        Self::new(initial, beta)
    }
}

impl CoolingSchedule for LundyMees {
    fn temperature(&self, step: usize) -> f64 {
        self.initial / (1.0 + step as f64 * self.beta * self.initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedules() -> Vec<Box<dyn CoolingSchedule>> {
        vec![
            Box::new(Geometric::new(50.0, 0.95)),
            Box::new(Linear::new(50.0, 0.7)),
            Box::new(Logarithmic::new(50.0)),
            Box::new(LundyMees::new(50.0, 0.01)),
        ]
    }

    #[test]
    fn test_starts_at_initial() {
        for s in schedules() {
            assert_eq!(s.temperature(0), 50.0, "{s:?}");
        }
    }

    #[test]
    fn test_non_increasing() {
        for s in schedules() {
            let mut prev = s.temperature(0);
            for k in 1..5000 {
                let t = s.temperature(k);
                assert!(t <= prev, "{s:?}: T({k}) = {t} > {prev}");
                assert!(t >= 0.0);
                prev = t;
            }
        }
    }

    #[test]
    fn test_geometric_values() {
        let s = Geometric::new(10.0, 0.9);
        assert!((s.temperature(3) - 10.0 * 0.729).abs() < 1e-12);
    }

    #[test]
    fn test_linear_clamps_at_zero() {
        let s = Linear::new(1.0, 0.3);
        assert_eq!(s.temperature(10), 0.0);
    }

    #[test]
    fn test_lundy_mees_matches_recurrence() {
        let s = LundyMees::new(20.0, 0.05);
        let mut t = 20.0;
        for k in 1..100 {
            t /= 1.0 + 0.05 * t;
            assert!((s.temperature(k) - t).abs() < 1e-9, "k={k}");
        }
    }

    #[test]
    fn test_lundy_mees_reaching() {
        let s = LundyMees::reaching(100.0, 0.01, 1000);
        assert!((s.temperature(1000) - 0.01).abs() < 1e-9);
    }
}
