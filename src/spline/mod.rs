//! Monotone cubic Hermite spline engine

/// The spline itself: knots, lazy recompute, evaluation
pub mod cubic_hermite;
/// Base gradient policies and the gradient stage pipeline
pub mod gradient;
/// Knot storage and input canonicalization
pub mod knots;
/// Fritsch-Carlson monotonicity correction
pub mod monotone;
/// Spline configuration and option sets
pub mod options;
