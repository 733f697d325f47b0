//! Spline configuration and the option sets merged into it

use crate::io::configuration::{DEFAULT_MONOTONIC_EPSILON, DEFAULT_STRICT_DOMAIN};
use crate::io::error::{Result, invalid_argument, require_finite};
use crate::spline::gradient::GradientMethod;
use crate::spline::knots::KnotSet;
use crate::spline::monotone::MonotonicMode;
use serde::{Deserialize, Serialize};

/// Complete spline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplineConfig {
    /// Base gradient estimate
    pub gradient_method: GradientMethod,
    /// Monotonic repair applied after fixed overrides
    pub monotonic: MonotonicMode,
    /// Gradients forced at specific abscissae
    pub fixed_gradients: KnotSet,
    /// Reject evaluation outside the knot range instead of extrapolating
    pub strict_domain: bool,
    /// Secants with magnitude below this are treated as flat
    pub monotonic_epsilon: f64,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            gradient_method: GradientMethod::default(),
            monotonic: MonotonicMode::default(),
            fixed_gradients: KnotSet::new(),
            strict_domain: DEFAULT_STRICT_DOMAIN,
            monotonic_epsilon: DEFAULT_MONOTONIC_EPSILON,
        }
    }
}

impl SplineConfig {
    /// Configuration with `options` merged over `self`
    ///
    /// The `data` option is not part of the configuration and is ignored here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A fixed gradient key or value is not finite
    /// - The monotonic epsilon is negative or not finite
    pub fn merged(&self, options: &SplineOptions) -> Result<Self> {
        let mut merged = self.clone();

        if let Some(method) = options.gradient_method {
            merged.gradient_method = method;
        }
        if let Some(mode) = options.monotonic {
            merged.monotonic = mode;
        }
        if let Some(strict) = options.strict_domain {
            merged.strict_domain = strict;
        }
        if let Some(epsilon) = options.monotonic_epsilon {
            if require_finite("monotonic_epsilon", epsilon)? < 0.0 {
                return Err(invalid_argument(
                    "monotonic_epsilon",
                    &epsilon,
                    &"must not be negative",
                ));
            }
            merged.monotonic_epsilon = epsilon;
        }
        if let Some(fixed) = &options.fixed_gradients {
            merged.fixed_gradients = fixed
                .iter()
                .map(|&(x, m)| {
                    Ok((
                        require_finite("fixed_gradients", x)?,
                        require_finite("fixed_gradients", m)?,
                    ))
                })
                .collect::<Result<KnotSet>>()?;
        }

        Ok(merged)
    }
}

/// Partial configuration merged by `configure`
///
/// Unset fields leave the current value alone. Setting `data` replaces the
/// whole knot set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplineOptions {
    /// Replacement knot set
    pub data: Option<Vec<(f64, f64)>>,
    /// Base gradient estimate
    pub gradient_method: Option<GradientMethod>,
    /// Monotonic repair mode
    pub monotonic: Option<MonotonicMode>,
    /// Gradients forced at specific abscissae, replacing any previous set
    pub fixed_gradients: Option<Vec<(f64, f64)>>,
    /// Strict domain checking
    pub strict_domain: Option<bool>,
    /// Flat-secant threshold
    pub monotonic_epsilon: Option<f64>,
}

impl SplineOptions {
    /// Empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the knot set with `points`
    #[must_use]
    pub fn data<I: IntoIterator<Item = (f64, f64)>>(mut self, points: I) -> Self {
        self.data = Some(points.into_iter().collect());
        self
    }

    /// Select the base gradient estimate
    #[must_use]
    pub fn gradient_method(mut self, method: GradientMethod) -> Self {
        self.gradient_method = Some(method);
        self
    }

    /// Select the monotonic repair mode
    #[must_use]
    pub fn monotonic(mut self, mode: MonotonicMode) -> Self {
        self.monotonic = Some(mode);
        self
    }

    /// Force gradients at the given abscissae
    #[must_use]
    pub fn fixed_gradients<I: IntoIterator<Item = (f64, f64)>>(mut self, gradients: I) -> Self {
        self.fixed_gradients = Some(gradients.into_iter().collect());
        self
    }

    /// Enable or disable strict domain checking
    #[must_use]
    pub fn strict_domain(mut self, strict: bool) -> Self {
        self.strict_domain = Some(strict);
        self
    }

    /// Set the flat-secant threshold
    #[must_use]
    pub fn monotonic_epsilon(mut self, epsilon: f64) -> Self {
        self.monotonic_epsilon = Some(epsilon);
        self
    }
}
