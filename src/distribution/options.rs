//! Estimator configuration and the option sets merged into it

use crate::distribution::boundary::{BoundaryPolicy, BoundarySide};
use crate::io::configuration::DEFAULT_QUANTILE_RESOLUTION;
use crate::io::error::{Result, invalid_argument};
use serde::{Deserialize, Serialize};

/// Complete estimator configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Policy at the left end of the CDF
    pub lower: BoundaryPolicy,
    /// Policy at the right end of the CDF
    pub upper: BoundaryPolicy,
    /// Pin a zero gradient at the lower boundary knot
    pub smooth_lower: bool,
    /// Pin a zero gradient at the upper boundary knot
    pub smooth_upper: bool,
    /// Minimum probability step between sampled CDF knots
    pub quantile_resolution: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            lower: BoundaryPolicy::Spline,
            upper: BoundaryPolicy::Spline,
            smooth_lower: false,
            smooth_upper: false,
            quantile_resolution: DEFAULT_QUANTILE_RESOLUTION,
        }
    }
}

impl DistributionConfig {
    /// Configuration with `options` merged over `self`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A boundary is NaN or the infinity of the wrong sign
    /// - Both boundaries are finite and lower >= upper
    /// - The quantile resolution is not strictly between 0 and 1
    pub fn merged(&self, options: &DistributionOptions) -> Result<Self> {
        let lower = options
            .lower
            .unwrap_or(self.lower)
            .normalized(BoundarySide::Lower)?;
        let upper = options
            .upper
            .unwrap_or(self.upper)
            .normalized(BoundarySide::Upper)?;

        if let (Some(lb), Some(ub)) = (lower.truncation(), upper.truncation())
            && lb >= ub
        {
            return Err(invalid_argument(
                "upper",
                &ub,
                &format!("must exceed the lower bound {lb}"),
            ));
        }

        let quantile_resolution = options
            .quantile_resolution
            .unwrap_or(self.quantile_resolution);
        if !(quantile_resolution > 0.0 && quantile_resolution < 1.0) {
            return Err(invalid_argument(
                "quantile_resolution",
                &quantile_resolution,
                &"expects numeric > 0 and < 1",
            ));
        }

        Ok(Self {
            lower,
            upper,
            smooth_lower: options.smooth_lower.unwrap_or(self.smooth_lower),
            smooth_upper: options.smooth_upper.unwrap_or(self.smooth_upper),
            quantile_resolution,
        })
    }
}

/// Partial configuration merged by `configure`
///
/// Unset fields leave the current value alone. Setting `data` replaces all
/// raw samples.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributionOptions {
    /// Replacement samples
    pub data: Option<Vec<f64>>,
    /// Lower boundary policy
    pub lower: Option<BoundaryPolicy>,
    /// Upper boundary policy
    pub upper: Option<BoundaryPolicy>,
    /// Zero gradient at the lower boundary knot
    pub smooth_lower: Option<bool>,
    /// Zero gradient at the upper boundary knot
    pub smooth_upper: Option<bool>,
    /// Quantile resolution, in (0, 1)
    pub quantile_resolution: Option<f64>,
}

impl DistributionOptions {
    /// Empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw samples
    #[must_use]
    pub fn data<I: IntoIterator<Item = f64>>(mut self, samples: I) -> Self {
        self.data = Some(samples.into_iter().collect());
        self
    }

    /// Set the lower boundary policy
    #[must_use]
    pub fn lower(mut self, policy: BoundaryPolicy) -> Self {
        self.lower = Some(policy);
        self
    }

    /// Set the upper boundary policy
    #[must_use]
    pub fn upper(mut self, policy: BoundaryPolicy) -> Self {
        self.upper = Some(policy);
        self
    }

    /// Set the lower boundary from a number; `-inf` means an exponential tail
    #[must_use]
    pub fn lower_bound(self, bound: f64) -> Self {
        self.lower(BoundaryPolicy::Fixed(bound))
    }

    /// Set the upper boundary from a number; `inf` means an exponential tail
    #[must_use]
    pub fn upper_bound(self, bound: f64) -> Self {
        self.upper(BoundaryPolicy::Fixed(bound))
    }

    /// Enable or disable lower boundary smoothing
    #[must_use]
    pub fn smooth_lower(mut self, smooth: bool) -> Self {
        self.smooth_lower = Some(smooth);
        self
    }

    /// Enable or disable upper boundary smoothing
    #[must_use]
    pub fn smooth_upper(mut self, smooth: bool) -> Self {
        self.smooth_upper = Some(smooth);
        self
    }

    /// Set the quantile resolution
    #[must_use]
    pub fn quantile_resolution(mut self, resolution: f64) -> Self {
        self.quantile_resolution = Some(resolution);
        self
    }
}
