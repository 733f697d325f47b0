//! Gradient estimation for cubic Hermite knots
//!
//! Gradients are produced by an ordered pipeline of stages over one vector:
//! a base estimate, then fixed-gradient overrides, then monotonic correction.

use crate::io::configuration::MIN_KNOTS;
use crate::io::error::{Result, SplineError, invalid_argument};
use crate::math::tridiagonal::TridiagonalSystem;
use crate::spline::knots::KnotSet;
use crate::spline::monotone::{MonotonicMode, enforce_monotonic};
use crate::spline::options::SplineConfig;
use serde::{Deserialize, Serialize};

/// Base policy for estimating per-knot gradients
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMethod {
    /// One-sided secants at the ends, mean of the adjacent secants inside
    #[default]
    FiniteDifference,
    /// Adjacent secants weighted by the opposite interval width
    ///
    /// Favors the secant over the closer interval, which behaves better on
    /// non-uniform spacing.
    WeightedSecant,
    /// Gradients giving a continuous second derivative at every interior knot
    TridiagonalSmooth,
}

/// Interval widths `x[j + 1] - x[j]`
pub fn widths(x: &[f64]) -> Vec<f64> {
    x.iter().zip(x.iter().skip(1)).map(|(lo, hi)| hi - lo).collect()
}

/// Secant slopes between consecutive knots
pub fn secants(x: &[f64], y: &[f64]) -> Vec<f64> {
    widths(x)
        .iter()
        .zip(y.iter().zip(y.iter().skip(1)))
        .map(|(h, (lo, hi))| (hi - lo) / h)
        .collect()
}

// Endpoints take the adjacent secant, interior knots blend their two secants
fn blend_interior(d: &[f64], h: &[f64], blend: impl Fn(f64, f64, f64, f64) -> f64) -> Vec<f64> {
    let (Some(&first), Some(&last)) = (d.first(), d.last()) else {
        return Vec::new();
    };

    let mut gradients = Vec::with_capacity(d.len() + 1);
    gradients.push(first);
    for ((&d_prev, &d_next), (&h_prev, &h_next)) in d
        .iter()
        .zip(d.iter().skip(1))
        .zip(h.iter().zip(h.iter().skip(1)))
    {
        gradients.push(blend(d_prev, d_next, h_prev, h_next));
    }
    gradients.push(last);
    gradients
}

/// Finite-difference gradients from interval widths `h` and secants `d`
pub fn finite_difference(h: &[f64], d: &[f64]) -> Vec<f64> {
    blend_interior(d, h, |d_prev, d_next, _, _| f64::midpoint(d_prev, d_next))
}

/// Width-weighted secant gradients from interval widths `h` and secants `d`
pub fn weighted_secant(h: &[f64], d: &[f64]) -> Vec<f64> {
    blend_interior(d, h, |d_prev, d_next, h_prev, h_next| {
        h_next.mul_add(d_prev, h_prev * d_next) / (h_prev + h_next)
    })
}

/// Gradients with second-derivative continuity at interior knots
///
/// Each interior row reads
/// `m[i-1]/h[i-1] + 2 m[i] (1/h[i-1] + 1/h[i]) + m[i+1]/h[i] = 3 (d[i-1]/h[i-1] + d[i]/h[i])`.
/// Free ends take the natural condition q'' = 0. Any knot listed in `fixed`
/// is pinned to its fixed gradient instead.
///
/// # Errors
///
/// Returns an error if fewer than two knots are given or the system is singular
pub fn tridiagonal_smooth(x: &[f64], h: &[f64], d: &[f64], fixed: &KnotSet) -> Result<Vec<f64>> {
    let n = x.len();
    let mut system = TridiagonalSystem::zeros(n);

    for (i, &xi) in x.iter().enumerate() {
        if let Some(pinned) = fixed.get(xi) {
            system.pin(i, pinned)?;
            continue;
        }

        let before = i.checked_sub(1).and_then(|k| h.get(k).zip(d.get(k)));
        let after = h.get(i).zip(d.get(i));
        match (before, after) {
            (None, Some((_, &d_next))) => system.set_row(i, 0.0, 2.0, 1.0, 3.0 * d_next)?,
            (Some((_, &d_prev)), None) => system.set_row(i, 1.0, 2.0, 0.0, 3.0 * d_prev)?,
            (Some((&h_prev, &d_prev)), Some((&h_next, &d_next))) => {
                let (w_prev, w_next) = (h_prev.recip(), h_next.recip());
                system.set_row(
                    i,
                    w_prev,
                    2.0 * (w_prev + w_next),
                    w_next,
                    3.0 * d_prev.mul_add(w_prev, d_next * w_next),
                )?;
            }
            (None, None) => {
                return Err(SplineError::InsufficientData {
                    required: MIN_KNOTS,
                    available: n,
                });
            }
        }
    }

    Ok(system.solve()?.to_vec())
}

/// Replace the gradient of every knot whose abscissa appears in `fixed`
pub fn apply_fixed_gradients(x: &[f64], gradients: &mut [f64], fixed: &KnotSet) {
    if fixed.is_empty() {
        return;
    }
    for (&xi, m) in x.iter().zip(gradients.iter_mut()) {
        if let Some(pinned) = fixed.get(xi) {
            *m = pinned;
        }
    }
}

/// One transformation of the gradient vector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientStage {
    /// Replace the vector with a fresh base estimate
    Base(GradientMethod),
    /// Overwrite pinned knots with their fixed gradients
    FixedOverrides,
    /// Repair gradients to keep the interpolant monotone
    MonotonicCorrection(MonotonicMode),
}

/// Ordered gradient stages derived from a spline configuration
#[derive(Clone, Copy, Debug)]
pub struct GradientPipeline<'a> {
    config: &'a SplineConfig,
}

impl<'a> GradientPipeline<'a> {
    /// Pipeline for the given configuration
    pub const fn new(config: &'a SplineConfig) -> Self {
        Self { config }
    }

    /// Stages in the order they are applied
    pub const fn stages(&self) -> [GradientStage; 3] {
        [
            GradientStage::Base(self.config.gradient_method),
            GradientStage::FixedOverrides,
            GradientStage::MonotonicCorrection(self.config.monotonic),
        ]
    }

    /// Run every stage over sorted abscissae `x` and aligned values `y`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `x` and `y` have different lengths
    /// - Fewer than two knots are given
    /// - The tridiagonal system for smooth gradients is singular
    pub fn run(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        if x.len() != y.len() {
            return Err(invalid_argument(
                "y",
                &y.len(),
                &format!("must match {} abscissae", x.len()),
            ));
        }
        if x.len() < MIN_KNOTS {
            return Err(SplineError::InsufficientData {
                required: MIN_KNOTS,
                available: x.len(),
            });
        }

        let h = widths(x);
        let d = secants(x, y);
        let mut gradients = Vec::with_capacity(x.len());
        for stage in self.stages() {
            self.apply(stage, x, &h, &d, &mut gradients)?;
        }
        Ok(gradients)
    }

    fn apply(
        &self,
        stage: GradientStage,
        x: &[f64],
        h: &[f64],
        d: &[f64],
        gradients: &mut Vec<f64>,
    ) -> Result<()> {
        let fixed = &self.config.fixed_gradients;
        match stage {
            GradientStage::Base(GradientMethod::FiniteDifference) => {
                *gradients = finite_difference(h, d);
            }
            GradientStage::Base(GradientMethod::WeightedSecant) => {
                *gradients = weighted_secant(h, d);
            }
            GradientStage::Base(GradientMethod::TridiagonalSmooth) => {
                *gradients = tridiagonal_smooth(x, h, d, fixed)?;
            }
            GradientStage::FixedOverrides => apply_fixed_gradients(x, gradients, fixed),
            GradientStage::MonotonicCorrection(mode) => {
                enforce_monotonic(d, gradients, mode, self.config.monotonic_epsilon);
            }
        }
        Ok(())
    }
}
