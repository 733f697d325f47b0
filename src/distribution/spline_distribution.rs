//! Nonparametric distribution estimated from raw samples
//!
//! The CDF is a monotone cubic Hermite spline fitted to a thinned empirical
//! CDF, and the PDF is its derivative. Each end of the support is either
//! extended along the spline tangent, truncated at a fixed bound, or given
//! an exponential tail. The model is refitted lazily on the first query
//! after the samples or the configuration change.

use crate::distribution::boundary::{BoundaryPolicy, BoundarySide};
use crate::distribution::moments::Moments;
use crate::distribution::options::{DistributionConfig, DistributionOptions};
use crate::distribution::sampling::{IntoSamples, sampled_cdf};
use crate::distribution::summary::SampleSummary;
use crate::io::configuration::MIN_SAMPLES;
use crate::io::error::{Result, SplineError, logic_error};
use crate::io::source::SampleSource;
use crate::math::probability::ExponentialTail;
use crate::spline::cubic_hermite::MonotoneHermiteSpline;
use crate::spline::gradient::GradientMethod;
use crate::spline::monotone::MonotonicMode;
use crate::spline::options::SplineOptions;
use std::cell::OnceCell;

// Point where the tangent at the extreme knot reaches 0 (lower) or 1 (upper)
fn tangent_crossing(spline: &MonotoneHermiteSpline, side: BoundarySide) -> Result<f64> {
    let (lower, upper) = spline.domain()?;
    let (operation, x) = match side {
        BoundarySide::Lower => ("lower spline extension", lower),
        BoundarySide::Upper => ("upper spline extension", upper),
    };
    let y = spline.evaluate(x)?;
    let slope = spline.derivative(x)?;
    if slope.is_nan() || slope <= 0.0 {
        return Err(logic_error(operation, &format!("yp= {slope}")));
    }

    let crossing = match side {
        BoundarySide::Lower => x - y / slope,
        BoundarySide::Upper => x + (1.0 - y) / slope,
    };
    let outward = match side {
        BoundarySide::Lower => crossing < x,
        BoundarySide::Upper => crossing > x,
    };
    if !outward || !crossing.is_finite() {
        return Err(logic_error(operation, &format!("b= {crossing}")));
    }
    Ok(crossing)
}

/// Everything derived from one fit of the samples
#[derive(Clone, Debug)]
struct FittedModel {
    spline: MonotoneHermiteSpline,
    lower_tail: Option<ExponentialTail>,
    upper_tail: Option<ExponentialTail>,
    support_min: f64,
    support_max: f64,
    moments: Moments,
}

impl FittedModel {
    fn fit(samples: &[f64], config: &DistributionConfig) -> Result<Self> {
        let lower_bound = config.lower.truncation();
        let upper_bound = config.upper.truncation();

        let mut kept: Vec<f64> = samples
            .iter()
            .copied()
            .filter(|&x| lower_bound.is_none_or(|lb| x > lb) && upper_bound.is_none_or(|ub| x < ub))
            .collect();
        if kept.len() < MIN_SAMPLES {
            return Err(SplineError::InsufficientData {
                required: MIN_SAMPLES,
                available: kept.len(),
            });
        }
        kept.sort_by(f64::total_cmp);

        let knots = sampled_cdf(&kept, config.quantile_resolution);
        tracing::debug!(
            samples = kept.len(),
            knots = knots.len(),
            resolution = config.quantile_resolution,
            "sampled empirical cdf"
        );

        let mut spline = MonotoneHermiteSpline::with_options(
            SplineOptions::new()
                .data(knots)
                .gradient_method(GradientMethod::WeightedSecant)
                .monotonic(MonotonicMode::Strict),
        )?;

        // Finite truncation bounds become literal knots
        let mut pinned = Vec::new();
        if let Some(lb) = lower_bound {
            spline.put((lb, 0.0))?;
            if config.smooth_lower {
                pinned.push((lb, 0.0));
            }
        }
        if let Some(ub) = upper_bound {
            spline.put((ub, 1.0))?;
            if config.smooth_upper {
                pinned.push((ub, 0.0));
            }
        }
        spline.configure(SplineOptions::new().fixed_gradients(pinned.iter().copied()))?;
        spline.recompute()?;

        // Both extensions are measured on the same fit, then refitted together
        let mut extensions = Vec::new();
        if config.lower == BoundaryPolicy::Spline {
            let crossing = tangent_crossing(&spline, BoundarySide::Lower)?;
            extensions.push((crossing, 0.0));
            if config.smooth_lower {
                pinned.push((crossing, 0.0));
            }
        }
        if config.upper == BoundaryPolicy::Spline {
            let crossing = tangent_crossing(&spline, BoundarySide::Upper)?;
            extensions.push((crossing, 1.0));
            if config.smooth_upper {
                pinned.push((crossing, 0.0));
            }
        }
        if !extensions.is_empty() {
            spline.put(extensions)?;
            spline.configure(SplineOptions::new().fixed_gradients(pinned))?;
            spline.recompute()?;
        }

        let (support_min, support_max) = spline.domain()?;
        let lower_tail = if config.lower.is_infinite() {
            let tail = ExponentialTail::fit_lower(
                support_min,
                spline.evaluate(support_min)?,
                spline.derivative(support_min)?,
            )?;
            tracing::debug!(a = tail.rate(), b = tail.intercept(), x = support_min, "fitted lower tail");
            Some(tail)
        } else {
            None
        };
        let upper_tail = if config.upper.is_infinite() {
            let tail = ExponentialTail::fit_upper(
                support_max,
                spline.evaluate(support_max)?,
                spline.derivative(support_max)?,
            )?;
            tracing::debug!(a = tail.rate(), b = tail.intercept(), x = support_max, "fitted upper tail");
            Some(tail)
        } else {
            None
        };

        let moments = Moments::integrate(
            &spline.segments()?,
            lower_tail.iter().chain(upper_tail.iter()),
        );
        tracing::debug!(
            mean = moments.mean,
            variance = moments.variance,
            lower = support_min,
            upper = support_max,
            "fitted distribution"
        );

        Ok(Self {
            spline,
            lower_tail,
            upper_tail,
            support_min,
            support_max,
            moments,
        })
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        if x < self.support_min {
            return Ok(self.lower_tail.map_or(0.0, |tail| tail.cdf(x)));
        }
        if x > self.support_max {
            return Ok(self.upper_tail.map_or(1.0, |tail| tail.cdf(x)));
        }
        self.spline.evaluate(x)
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        if x < self.support_min {
            return Ok(self.lower_tail.map_or(0.0, |tail| tail.pdf(x)));
        }
        if x > self.support_max {
            return Ok(self.upper_tail.map_or(0.0, |tail| tail.pdf(x)));
        }
        self.spline.derivative(x)
    }

    fn support(&self) -> (f64, f64) {
        (
            self.lower_tail.map_or(self.support_min, |_| f64::NEG_INFINITY),
            self.upper_tail.map_or(self.support_max, |_| f64::INFINITY),
        )
    }
}

/// Distribution estimated from raw samples through a spline-fitted CDF
#[derive(Clone, Debug, Default)]
pub struct EmpiricalDistribution {
    config: DistributionConfig,
    samples: Vec<f64>,
    model: OnceCell<FittedModel>,
}

impl EmpiricalDistribution {
    /// Create an empty estimator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator and apply `options` to it
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation, see [`Self::configure`]
    pub fn with_options(options: DistributionOptions) -> Result<Self> {
        let mut distribution = Self::new();
        distribution.configure(options)?;
        Ok(distribution)
    }

    /// Append one or more samples
    ///
    /// # Errors
    ///
    /// Returns an error if any value is not a finite number. Nothing is
    /// appended in that case.
    pub fn put<S: IntoSamples>(&mut self, samples: S) -> Result<()> {
        let values = samples.into_samples()?;
        if values.is_empty() {
            return Ok(());
        }
        self.samples.extend(values);
        self.invalidate();
        Ok(())
    }

    /// Draw `count` samples from `source` and append them
    ///
    /// # Errors
    ///
    /// Returns an error if the source produces a non-finite value. Nothing
    /// is appended in that case.
    pub fn put_from<S: SampleSource + ?Sized>(&mut self, source: &mut S, count: usize) -> Result<()> {
        let drawn: Vec<f64> = std::iter::repeat_with(|| source.next_sample())
            .take(count)
            .collect();
        self.put(drawn)
    }

    /// Merge `options` into the configuration
    ///
    /// Samples are left alone unless `options.data` is set, in which case
    /// they are all replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A boundary is NaN or the infinity of the wrong sign
    /// - Two finite boundaries are out of order
    /// - The quantile resolution is not strictly between 0 and 1
    /// - The replacement data is not finite
    ///
    /// Nothing changes when an error is returned.
    pub fn configure(&mut self, options: DistributionOptions) -> Result<()> {
        let config = self.config.merged(&options)?;
        let data = options.data.map(IntoSamples::into_samples).transpose()?;

        self.config = config;
        if let Some(samples) = data {
            self.samples = samples;
        }
        self.invalidate();
        Ok(())
    }

    /// Snapshot of the current configuration
    pub fn configuration(&self) -> DistributionConfig {
        self.config.clone()
    }

    /// Copy of the raw samples
    pub fn data(&self) -> Vec<f64> {
        self.samples.clone()
    }

    /// Descriptive statistics of the raw samples
    pub fn summary(&self) -> SampleSummary {
        SampleSummary::from_samples(&self.samples)
    }

    /// Drop samples and the fitted model, keeping the configuration
    pub fn clear(&mut self) {
        self.clear_data();
        self.invalidate();
    }

    /// Drop the raw samples but keep the fitted model for queries
    pub fn clear_data(&mut self) {
        self.samples.clear();
    }

    /// Drop everything and restore the default configuration
    pub fn reset(&mut self) {
        self.config = DistributionConfig::default();
        self.clear();
    }

    /// Whether the next query will refit the model
    pub fn is_dirty(&self) -> bool {
        self.model.get().is_none()
    }

    fn invalidate(&mut self) {
        self.model.take();
    }

    fn model(&self) -> Result<&FittedModel> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        let model = FittedModel::fit(&self.samples, &self.config)?;
        Ok(self.model.get_or_init(|| model))
    }

    /// Refit the model if it is dirty
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two samples remain inside the finite bounds
    /// - The fitted curve cannot be extended or given a tail
    pub fn recompute(&self) -> Result<()> {
        self.model().map(|_| ())
    }

    /// Copy of the spline modelling the CDF
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::recompute`]
    pub fn spline(&self) -> Result<MonotoneHermiteSpline> {
        Ok(self.model()?.spline.clone())
    }

    /// Cumulative distribution function at `x`
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be fitted or `x` is NaN
    pub fn cdf(&self, x: f64) -> Result<f64> {
        self.model()?.cdf(x)
    }

    /// Probability density at `x`
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be fitted or `x` is NaN
    pub fn pdf(&self, x: f64) -> Result<f64> {
        self.model()?.pdf(x)
    }

    /// Mean of the fitted distribution
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::recompute`]
    pub fn mean(&self) -> Result<f64> {
        Ok(self.model()?.moments.mean)
    }

    /// Variance of the fitted distribution
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::recompute`]
    pub fn variance(&self) -> Result<f64> {
        Ok(self.model()?.moments.variance)
    }

    /// Interval of support, infinite on sides with an exponential tail
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::recompute`]
    pub fn support(&self) -> Result<(f64, f64)> {
        Ok(self.model()?.support())
    }
}
