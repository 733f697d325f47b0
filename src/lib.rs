//! Nonparametric distribution estimation built on monotone cubic Hermite splines
//!
//! A spline engine interpolates arbitrary knot sets with a choice of gradient
//! policies and optional monotonicity enforcement. On top of it, an empirical
//! estimator turns raw samples into a smooth CDF and PDF with finite, spline
//! extrapolated or exponential tails, plus closed-form mean and variance.

#![forbid(unsafe_code)]

/// Empirical distribution estimator and its supporting pieces
pub mod distribution;
/// Error handling, tuning constants and sample sources
pub mod io;
/// Numerical kernels: tridiagonal solver, Hermite segments, exponential tails
pub mod math;
/// Monotone cubic Hermite spline engine
pub mod spline;

pub use distribution::boundary::BoundaryPolicy;
pub use distribution::options::DistributionOptions;
pub use distribution::spline_distribution::EmpiricalDistribution;
pub use io::error::{Result, SplineError};
pub use spline::cubic_hermite::MonotoneHermiteSpline;
pub use spline::options::SplineOptions;
