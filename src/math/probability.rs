//! Exponential tails attached to a fitted CDF for unbounded support
//!
//! A tail is matched to the value y and slope y' of the fitted curve at an
//! anchor abscissa, so the CDF and the PDF are both continuous at the join.

use crate::io::error::{Result, logic_error};

/// Analytic exponential tail beyond one end of the fitted domain
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExponentialTail {
    /// Tail on `(-inf, anchor]` with CDF `exp(rate * x + intercept)`
    Lower {
        /// Abscissa where the tail meets the fitted curve
        anchor: f64,
        /// Exponential rate, strictly positive
        rate: f64,
        /// Log-scale intercept
        intercept: f64,
    },
    /// Tail on `[anchor, inf)` with CDF `1 - exp(intercept - rate * x)`
    Upper {
        /// Abscissa where the tail meets the fitted curve
        anchor: f64,
        /// Exponential rate, strictly positive
        rate: f64,
        /// Log-scale intercept
        intercept: f64,
    },
}

impl ExponentialTail {
    /// Fit a lower tail matching CDF value `y` and density `slope` at `anchor`
    ///
    /// # Errors
    ///
    /// Returns a logic error if `y` is not in (0, 1), the derived rate is not
    /// positive, or the parameters are not finite
    pub fn fit_lower(anchor: f64, y: f64, slope: f64) -> Result<Self> {
        if y <= 0.0 || y >= 1.0 {
            return Err(logic_error("lower tail fit", &format!("y= {y}")));
        }
        let rate = slope / y;
        if rate.is_nan() || rate <= 0.0 {
            return Err(logic_error("lower tail fit", &format!("a= {rate}")));
        }
        let intercept = rate.mul_add(-anchor, y.ln());

        Self::Lower {
            anchor,
            rate,
            intercept,
        }
        .checked("lower tail fit")
    }

    /// Fit an upper tail matching CDF value `y` and density `slope` at `anchor`
    ///
    /// # Errors
    ///
    /// Returns a logic error if `y` is not in (0, 1), the derived rate is not
    /// positive, or the parameters are not finite
    pub fn fit_upper(anchor: f64, y: f64, slope: f64) -> Result<Self> {
        if y <= 0.0 || y >= 1.0 {
            return Err(logic_error("upper tail fit", &format!("y= {y}")));
        }
        let complement = 1.0 - y;
        let rate = slope / complement;
        if rate.is_nan() || rate <= 0.0 {
            return Err(logic_error("upper tail fit", &format!("a= {rate}")));
        }
        let intercept = rate.mul_add(anchor, complement.ln());

        Self::Upper {
            anchor,
            rate,
            intercept,
        }
        .checked("upper tail fit")
    }

    fn checked(self, operation: &'static str) -> Result<Self> {
        let (anchor, rate, intercept) = self.parameters();
        if anchor.is_finite() && rate.is_finite() && intercept.is_finite() {
            Ok(self)
        } else {
            Err(logic_error(
                operation,
                &format!("non-finite parameters a= {rate} b= {intercept} at x= {anchor}"),
            ))
        }
    }

    /// `(anchor, rate, intercept)` regardless of side
    pub const fn parameters(&self) -> (f64, f64, f64) {
        match *self {
            Self::Lower {
                anchor,
                rate,
                intercept,
            }
            | Self::Upper {
                anchor,
                rate,
                intercept,
            } => (anchor, rate, intercept),
        }
    }

    /// Exponential rate `a`
    pub const fn rate(&self) -> f64 {
        self.parameters().1
    }

    /// Log-scale intercept `b`
    pub const fn intercept(&self) -> f64 {
        self.parameters().2
    }

    /// Abscissa where the tail joins the fitted curve
    pub const fn anchor(&self) -> f64 {
        self.parameters().0
    }

    // exp(a x + b) for the lower side, exp(b - a x) for the upper side
    fn mass(&self, x: f64) -> f64 {
        match *self {
            Self::Lower {
                rate, intercept, ..
            } => rate.mul_add(x, intercept).exp(),
            Self::Upper {
                rate, intercept, ..
            } => rate.mul_add(-x, intercept).exp(),
        }
    }

    /// Tail CDF at `x`
    pub fn cdf(&self, x: f64) -> f64 {
        match self {
            Self::Lower { .. } => self.mass(x),
            Self::Upper { .. } => 1.0 - self.mass(x),
        }
    }

    /// Tail density at `x`
    pub fn pdf(&self, x: f64) -> f64 {
        self.rate() * self.mass(x)
    }

    /// Integral of x pdf(x) over the tail
    pub fn first_moment(&self) -> f64 {
        let (anchor, rate, _) = self.parameters();
        let mass = self.mass(anchor);
        match self {
            Self::Lower { .. } => (anchor - 1.0 / rate) * mass,
            Self::Upper { .. } => (anchor + 1.0 / rate) * mass,
        }
    }

    /// Integral of x^2 pdf(x) over the tail
    pub fn second_moment(&self) -> f64 {
        let (anchor, rate, _) = self.parameters();
        let mass = self.mass(anchor);
        let curvature = 2.0 / (rate * rate);
        match self {
            Self::Lower { .. } => anchor.mul_add(anchor, curvature - 2.0 * anchor / rate) * mass,
            Self::Upper { .. } => anchor.mul_add(anchor, curvature + 2.0 * anchor / rate) * mass,
        }
    }
}
