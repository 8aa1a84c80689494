//! Metropolis acceptance criterion.

use rand::Rng;

/// Probability of accepting a move with energy change `delta` at
/// `temperature`.
///
/// Non-worsening moves always pass. For worsening moves the value is
/// `exp(-delta / T)`, clamped to `[0, 1]`; a zero temperature or a NaN delta
/// yields 0 rather than an error.
///
/// # Examples
///
/// ```
/// use u_anneal::anneal::acceptance_probability;
///
/// assert_eq!(acceptance_probability(-1.0, 10.0), 1.0);
/// assert!((acceptance_probability(1.0, 1.0) - (-1.0f64).exp()).abs() < 1e-15);
/// assert_eq!(acceptance_probability(1e300, 1e-300), 0.0);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta.is_nan() {
        return 0.0;
    }
    if delta <= 0.0 {
        return 1.0;
    }
    if !(temperature > 0.0) {
        return 0.0;
    }
    let p = (-delta / temperature).exp();
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Draws the accept/reject decision.
///
/// Consumes one uniform draw from `rng` only for worsening moves.
pub fn metropolis<R: Rng + ?Sized>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    let p = acceptance_probability(delta, temperature);
    rng.random::<f64>() < p
}
