//! Distribution estimation from raw samples

/// Boundary policies for the ends of the CDF
pub mod boundary;
/// Mean and variance integration
pub mod moments;
/// Estimator configuration and option sets
pub mod options;
/// Sample ingestion and empirical CDF thinning
pub mod sampling;
/// The estimator: samples, lazy fit, CDF and PDF queries
pub mod spline_distribution;
/// Running statistics over raw samples
pub mod summary;
