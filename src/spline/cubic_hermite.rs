//! Piecewise cubic Hermite spline with selectable gradient policies
//!
//! Knots may be entered in any order. Derived state (sorted abscissae,
//! aligned values and gradients) is rebuilt lazily on the first query after
//! any change to the knots or the configuration, and then reused until the
//! next change.

use crate::io::configuration::MIN_KNOTS;
use crate::io::error::{Result, SplineError};
use crate::math::hermite::HermiteSegment;
use crate::spline::gradient::GradientPipeline;
use crate::spline::knots::{IntoKnots, KnotSet};
use crate::spline::options::{SplineConfig, SplineOptions};
use std::cell::OnceCell;

/// Sorted knot vectors and their gradients
#[derive(Clone, Debug, PartialEq)]
struct DerivedState {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl DerivedState {
    fn build(knots: &KnotSet, config: &SplineConfig) -> Result<Self> {
        let (x, y) = knots.columns();
        if x.len() < MIN_KNOTS {
            return Err(SplineError::InsufficientData {
                required: MIN_KNOTS,
                available: x.len(),
            });
        }

        let m = GradientPipeline::new(config).run(&x, &y)?;
        tracing::trace!(
            knots = x.len(),
            method = ?config.gradient_method,
            monotonic = ?config.monotonic,
            "rebuilt spline gradients"
        );

        Ok(Self { x, y, m })
    }

    fn lower(&self) -> Result<f64> {
        self.x.first().copied().ok_or(SplineError::InsufficientData {
            required: MIN_KNOTS,
            available: 0,
        })
    }

    fn upper(&self) -> Result<f64> {
        self.x.last().copied().ok_or(SplineError::InsufficientData {
            required: MIN_KNOTS,
            available: 0,
        })
    }

    fn knot(&self, j: usize) -> Option<(f64, f64, f64)> {
        Some((*self.x.get(j)?, *self.y.get(j)?, *self.m.get(j)?))
    }

    fn segment_at(&self, j: usize) -> Result<HermiteSegment> {
        let lo = self.knot(j);
        let hi = self.knot(j + 1);
        lo.zip(hi)
            .map(|(lo, hi)| HermiteSegment::between(lo, hi))
            .ok_or(SplineError::InsufficientData {
                required: MIN_KNOTS,
                available: self.x.len(),
            })
    }

    // Binary search for the bracketing interval; the ends extend outward
    fn locate(&self, x: f64, strict_domain: bool) -> Result<HermiteSegment> {
        let (lower, upper) = (self.lower()?, self.upper()?);
        if strict_domain && !(lower..=upper).contains(&x) {
            return Err(SplineError::OutOfDomain { x, lower, upper });
        }

        let last_interval = self.x.len().saturating_sub(MIN_KNOTS);
        let j = self
            .x
            .partition_point(|&knot| knot <= x)
            .saturating_sub(1)
            .min(last_interval);
        self.segment_at(j)
    }
}

/// Cubic Hermite interpolant over a set of knots
///
/// Gradients come from the configured [`GradientMethod`](crate::spline::gradient::GradientMethod),
/// followed by fixed-gradient overrides and optional monotonic correction.
#[derive(Clone, Debug, Default)]
pub struct MonotoneHermiteSpline {
    config: SplineConfig,
    knots: KnotSet,
    derived: OnceCell<DerivedState>,
}

impl MonotoneHermiteSpline {
    /// Create an empty spline with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spline and apply `options` to it
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation, see [`Self::configure`]
    pub fn with_options(options: SplineOptions) -> Result<Self> {
        let mut spline = Self::new();
        spline.configure(options)?;
        Ok(spline)
    }

    /// Merge `knots` into the knot set, replacing values at repeated abscissae
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read as finite points. No
    /// knot is entered in that case.
    pub fn put<K: IntoKnots>(&mut self, knots: K) -> Result<()> {
        let points = knots.into_knots()?;
        if points.is_empty() {
            return Ok(());
        }
        self.knots.extend(points);
        self.invalidate();
        Ok(())
    }

    /// Merge `options` into the configuration
    ///
    /// Knots are left alone unless `options.data` is set, in which case the
    /// whole knot set is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A fixed gradient or the monotonic epsilon is not a valid float
    /// - The replacement data is not finite
    ///
    /// Nothing changes when an error is returned.
    pub fn configure(&mut self, options: SplineOptions) -> Result<()> {
        let config = self.config.merged(&options)?;
        let data = options.data.map(IntoKnots::into_knots).transpose()?;

        self.config = config;
        if let Some(points) = data {
            self.knots = points.into_iter().collect();
        }
        self.invalidate();
        Ok(())
    }

    /// Snapshot of the current configuration
    pub fn configuration(&self) -> SplineConfig {
        self.config.clone()
    }

    /// Copy of the knot set
    pub fn data(&self) -> KnotSet {
        self.knots.clone()
    }

    /// Drop all knots, keeping the configuration
    pub fn clear(&mut self) {
        self.knots.clear();
        self.invalidate();
    }

    /// Drop all knots and restore the default configuration
    pub fn reset(&mut self) {
        self.config = SplineConfig::default();
        self.clear();
    }

    /// Whether derived state is missing or out of sync with the knot set
    pub fn is_dirty(&self) -> bool {
        self.derived
            .get()
            .is_none_or(|state| state.x.len() != self.knots.len())
    }

    fn invalidate(&mut self) {
        self.derived.take();
    }

    fn state(&self) -> Result<&DerivedState> {
        if let Some(state) = self.derived.get() {
            return Ok(state);
        }
        let state = DerivedState::build(&self.knots, &self.config)?;
        Ok(self.derived.get_or_init(|| state))
    }

    /// Rebuild derived state if it is dirty
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two knots are present
    /// - The smooth-gradient system is singular
    pub fn recompute(&self) -> Result<()> {
        self.state().map(|_| ())
    }

    fn segment(&self, x: f64) -> Result<HermiteSegment> {
        self.state()?.locate(x, self.config.strict_domain)
    }

    /// Interpolated value q(x)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two knots are present
    /// - `x` lies outside the domain and strict domain checking is on
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        Ok(self.segment(x)?.value(x))
    }

    /// First derivative q'(x)
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::evaluate`]
    pub fn derivative(&self, x: f64) -> Result<f64> {
        Ok(self.segment(x)?.derivative(x))
    }

    /// Second derivative q''(x)
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::evaluate`]
    pub fn second_derivative(&self, x: f64) -> Result<f64> {
        Ok(self.segment(x)?.second_derivative(x))
    }

    /// Smallest and largest knot abscissa
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two knots are present
    pub fn domain(&self) -> Result<(f64, f64)> {
        let state = self.state()?;
        Ok((state.lower()?, state.upper()?))
    }

    /// Sorted knot abscissae
    ///
    /// # Errors
    ///
    /// Returns an error if the spline cannot be recomputed
    pub fn x(&self) -> Result<Vec<f64>> {
        Ok(self.state()?.x.clone())
    }

    /// Knot values aligned with [`Self::x`]
    ///
    /// # Errors
    ///
    /// Returns an error if the spline cannot be recomputed
    pub fn y(&self) -> Result<Vec<f64>> {
        Ok(self.state()?.y.clone())
    }

    /// Knot gradients aligned with [`Self::x`]
    ///
    /// # Errors
    ///
    /// Returns an error if the spline cannot be recomputed
    pub fn m(&self) -> Result<Vec<f64>> {
        Ok(self.state()?.m.clone())
    }

    /// Every segment between consecutive knots, left to right
    ///
    /// # Errors
    ///
    /// Returns an error if the spline cannot be recomputed
    pub fn segments(&self) -> Result<Vec<HermiteSegment>> {
        let state = self.state()?;
        (0..state.x.len().saturating_sub(1))
            .map(|j| state.segment_at(j))
            .collect()
    }
}
