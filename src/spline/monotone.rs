//! Fritsch-Carlson monotonicity correction applied to computed gradients
//!
//! The correction is a single greedy pass over adjacent knot pairs. It never
//! fails: flat and locally non-monotone intervals fall back to zero gradients.

use crate::io::configuration::MONOTONE_RADIUS;
use serde::{Deserialize, Serialize};

/// How strictly gradients are repaired to keep the interpolant monotone
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonotonicMode {
    /// Leave gradients untouched
    #[default]
    None,
    /// Clamp each of alpha and beta to at most 3 independently
    NonStrict,
    /// Rescale (alpha, beta) onto the circle of radius 3 when outside it
    Strict,
}

/// Corrected `(m_lo, m_hi)` for one interval with secant slope `delta`
pub fn correct_interval(
    delta: f64,
    m_lo: f64,
    m_hi: f64,
    mode: MonotonicMode,
    epsilon: f64,
) -> (f64, f64) {
    if mode == MonotonicMode::None {
        return (m_lo, m_hi);
    }

    // Flat region
    if delta.abs() < epsilon {
        return (0.0, 0.0);
    }

    let alpha = m_lo / delta;
    let beta = m_hi / delta;

    // Data not monotone here, go flat
    if alpha < 0.0 || beta < 0.0 {
        return (0.0, 0.0);
    }

    match mode {
        MonotonicMode::Strict => {
            let radius_sq = alpha.mul_add(alpha, beta * beta);
            if radius_sq > MONOTONE_RADIUS * MONOTONE_RADIUS {
                let tau = MONOTONE_RADIUS / radius_sq.sqrt();
                (tau * alpha * delta, tau * beta * delta)
            } else {
                (m_lo, m_hi)
            }
        }
        MonotonicMode::NonStrict => (
            if alpha > MONOTONE_RADIUS { MONOTONE_RADIUS * delta } else { m_lo },
            if beta > MONOTONE_RADIUS { MONOTONE_RADIUS * delta } else { m_hi },
        ),
        MonotonicMode::None => (m_lo, m_hi),
    }
}

/// Repair `gradients` in place, one interval at a time from left to right
///
/// `secants[j]` is the slope between knots `j` and `j + 1`. Each interval
/// sees the gradients already written by the interval before it.
pub fn enforce_monotonic(
    secants: &[f64],
    gradients: &mut [f64],
    mode: MonotonicMode,
    epsilon: f64,
) {
    if mode == MonotonicMode::None {
        return;
    }

    for (j, &delta) in secants.iter().enumerate() {
        let (Some(&m_lo), Some(&m_hi)) = (gradients.get(j), gradients.get(j + 1)) else {
            break;
        };
        let (lo, hi) = correct_interval(delta, m_lo, m_hi, mode, epsilon);
        if let Some(slot) = gradients.get_mut(j) {
            *slot = lo;
        }
        if let Some(slot) = gradients.get_mut(j + 1) {
            *slot = hi;
        }
    }
}
