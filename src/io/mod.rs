//! Error handling, tuning constants and sample sources

/// Default values and numerical constants
pub mod configuration;
/// Error types and constructor helpers
pub mod error;
/// Seeded sample producers
pub mod source;
