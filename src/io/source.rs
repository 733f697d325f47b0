//! Sample producers feeding the distribution estimator
//!
//! The estimator only needs something that yields one scalar per call.
//! [`SeededSource`] wraps a seeded [`StdRng`] so that the same seed always
//! reproduces the same stream.

use crate::io::error::{Result, invalid_argument, require_finite};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;

/// Anything that produces a stream of scalar observations
pub trait SampleSource {
    /// Draw the next observation
    fn next_sample(&mut self) -> f64;
}

impl<F> SampleSource for F
where
    F: FnMut() -> f64,
{
    fn next_sample(&mut self) -> f64 {
        self()
    }
}

/// Shape of the variates produced by a [`SeededSource`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleShape {
    /// Uniform on `[lower, upper)`
    Uniform {
        /// Inclusive lower end
        lower: f64,
        /// Exclusive upper end
        upper: f64,
    },
    /// Gaussian with the given mean and standard deviation
    Normal {
        /// Location
        mean: f64,
        /// Scale, strictly positive
        std_dev: f64,
    },
    /// Exponential on `[0, inf)` with the given rate
    Exponential {
        /// Rate, strictly positive
        rate: f64,
    },
}

impl SampleShape {
    fn validate(self) -> Result<Self> {
        match self {
            Self::Uniform { lower, upper } => {
                require_finite("lower", lower)?;
                require_finite("upper", upper)?;
                if lower >= upper {
                    return Err(invalid_argument(
                        "upper",
                        &upper,
                        &format!("must exceed lower bound {lower}"),
                    ));
                }
            }
            Self::Normal { mean, std_dev } => {
                require_finite("mean", mean)?;
                require_finite("std_dev", std_dev)?;
                if std_dev <= 0.0 {
                    return Err(invalid_argument("std_dev", &std_dev, &"must be positive"));
                }
            }
            Self::Exponential { rate } => {
                require_finite("rate", rate)?;
                if rate <= 0.0 {
                    return Err(invalid_argument("rate", &rate, &"must be positive"));
                }
            }
        }
        Ok(self)
    }
}

/// Deterministic sample stream backed by a seeded [`StdRng`]
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: StdRng,
    shape: SampleShape,
}

impl SeededSource {
    /// Create a source with the given seed and variate shape
    ///
    /// # Errors
    ///
    /// Returns an error if the shape parameters are non-finite, a scale or
    /// rate is not positive, or a uniform range is empty
    pub fn new(seed: u64, shape: SampleShape) -> Result<Self> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            shape: shape.validate()?,
        })
    }

    /// Uniform variates on `[0, 1)`
    pub fn unit_uniform(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            shape: SampleShape::Uniform {
                lower: 0.0,
                upper: 1.0,
            },
        }
    }

    /// Standard normal variates
    pub fn standard_normal(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            shape: SampleShape::Normal {
                mean: 0.0,
                std_dev: 1.0,
            },
        }
    }

    /// Shape of the variates this source produces
    pub const fn shape(&self) -> SampleShape {
        self.shape
    }

    // Maps [0, 1) onto (0, 1] so logarithms stay finite
    fn open_unit(&mut self) -> f64 {
        1.0 - self.rng.random::<f64>()
    }
}

impl SampleSource for SeededSource {
    fn next_sample(&mut self) -> f64 {
        match self.shape {
            SampleShape::Uniform { lower, upper } => {
                let u: f64 = self.rng.random();
                u.mul_add(upper - lower, lower)
            }
            SampleShape::Normal { mean, std_dev } => {
                // Box-Muller, cosine branch only
                let radius = (-2.0 * self.open_unit().ln()).sqrt();
                let angle = TAU * self.rng.random::<f64>();
                (radius * angle.cos()).mul_add(std_dev, mean)
            }
            SampleShape::Exponential { rate } => -self.open_unit().ln() / rate,
        }
    }
}
