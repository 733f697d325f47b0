//! Running descriptive statistics over raw samples
//!
//! Uses Welford's online update, so the summary can be built in one pass
//! without the cancellation of the naive `E[X^2] - E[X]^2` formula.

use serde::{Deserialize, Serialize};

/// Count, range, mean and spread of a sample set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    count: usize,
    min: f64,
    max: f64,
    mean: f64,
    m2: f64,
}

impl Default for SampleSummary {
    fn default() -> Self {
        Self {
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            m2: 0.0,
        }
    }
}

impl SampleSummary {
    /// Empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary of every value in `samples`
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut summary = Self::new();
        for &x in samples {
            summary.update(x);
        }
        summary
    }

    /// Add one observation
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 = delta.mul_add(x - self.mean, self.m2);
    }

    /// Number of observations
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Smallest observation
    pub const fn min(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.min) }
    }

    /// Largest observation
    pub const fn max(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.max) }
    }

    /// Arithmetic mean
    pub const fn mean(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.mean) }
    }

    /// Population variance
    pub fn variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}
