//! Numerical kernels underneath the spline and the estimator

/// Cubic Hermite segment evaluation and closed-form moment integrals
pub mod hermite;
/// Exponential tail models for unbounded support
pub mod probability;
/// Tridiagonal linear system solver
pub mod tridiagonal;
