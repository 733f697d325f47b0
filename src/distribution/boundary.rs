//! Boundary policies for the ends of an estimated CDF

use crate::io::error::{Result, invalid_argument};
use serde::{Deserialize, Serialize};

/// How the CDF behaves past one end of the fitted knots
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Extend the curve along its end tangent until it reaches 0 or 1
    #[default]
    Spline,
    /// Attach an exponential tail, giving unbounded support on that side
    Infinite,
    /// Truncate at a finite bound where the CDF is pinned to 0 or 1
    Fixed(f64),
}

/// Which end of the distribution a policy applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundarySide {
    /// Left end, CDF approaching 0
    Lower,
    /// Right end, CDF approaching 1
    Upper,
}

impl BoundarySide {
    /// Option name used in error reports
    pub const fn parameter(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }

    /// The infinity that stands for [`BoundaryPolicy::Infinite`] on this side
    pub const fn infinity(self) -> f64 {
        match self {
            Self::Lower => f64::NEG_INFINITY,
            Self::Upper => f64::INFINITY,
        }
    }
}

impl From<f64> for BoundaryPolicy {
    fn from(bound: f64) -> Self {
        Self::Fixed(bound)
    }
}

impl BoundaryPolicy {
    /// Validate the policy for `side`, folding a matching infinity into `Infinite`
    ///
    /// # Errors
    ///
    /// Returns an error if a fixed bound is NaN or an infinity of the wrong sign
    pub fn normalized(self, side: BoundarySide) -> Result<Self> {
        match self {
            Self::Fixed(bound) if bound == side.infinity() => Ok(Self::Infinite),
            Self::Fixed(bound) if !bound.is_finite() => Err(invalid_argument(
                side.parameter(),
                &bound,
                &"expects spline, infinite, the matching infinity or a finite bound",
            )),
            policy => Ok(policy),
        }
    }

    /// Finite truncation bound, if any
    pub const fn truncation(self) -> Option<f64> {
        match self {
            Self::Fixed(bound) => Some(bound),
            Self::Spline | Self::Infinite => None,
        }
    }

    /// Whether this side carries an exponential tail
    pub const fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }
}
