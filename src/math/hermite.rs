//! Single cubic Hermite segment: basis evaluation and moment integrals
//!
//! A segment is parameterized by its left abscissa, width, end values and
//! end gradients. Evaluation uses the normalized position t = (x - x_lo) / h,
//! so the same formulas also extrapolate past either end.

/// One piece of a cubic Hermite interpolant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HermiteSegment {
    /// Left abscissa
    pub x_lo: f64,
    /// Segment width, strictly positive for well-formed knots
    pub h: f64,
    /// Value at the left end
    pub y_lo: f64,
    /// Value at the right end
    pub y_hi: f64,
    /// Gradient at the left end
    pub m_lo: f64,
    /// Gradient at the right end
    pub m_hi: f64,
}

impl HermiteSegment {
    /// Build the segment between knots `(x_lo, y_lo, m_lo)` and `(x_hi, y_hi, m_hi)`
    pub const fn between(lo: (f64, f64, f64), hi: (f64, f64, f64)) -> Self {
        Self {
            x_lo: lo.0,
            h: hi.0 - lo.0,
            y_lo: lo.1,
            y_hi: hi.1,
            m_lo: lo.2,
            m_hi: hi.2,
        }
    }

    /// Right abscissa
    pub const fn x_hi(&self) -> f64 {
        self.x_lo + self.h
    }

    /// Normalized position of `x` within the segment
    pub const fn position(&self, x: f64) -> f64 {
        (x - self.x_lo) / self.h
    }

    /// Interpolant value q(x)
    pub const fn value(&self, x: f64) -> f64 {
        let t = self.position(x);
        let t2 = t * t;
        let t3 = t2 * t;
        let h = self.h;

        (2.0 * t3 - 3.0 * t2 + 1.0) * self.y_lo
            + (t3 - 2.0 * t2 + t) * h * self.m_lo
            + (3.0 * t2 - 2.0 * t3) * self.y_hi
            + (t3 - t2) * h * self.m_hi
    }

    /// First derivative q'(x)
    pub const fn derivative(&self, x: f64) -> f64 {
        let t = self.position(x);
        let t2 = t * t;
        let h = self.h;

        ((6.0 * t2 - 6.0 * t) * self.y_lo
            + (3.0 * t2 - 4.0 * t + 1.0) * h * self.m_lo
            + (6.0 * t - 6.0 * t2) * self.y_hi
            + (3.0 * t2 - 2.0 * t) * h * self.m_hi)
            / h
    }

    /// Second derivative q''(x)
    pub const fn second_derivative(&self, x: f64) -> f64 {
        let t = self.position(x);
        let h = self.h;

        ((12.0 * t - 6.0) * self.y_lo
            + (6.0 * t - 4.0) * h * self.m_lo
            + (6.0 - 12.0 * t) * self.y_hi
            + (6.0 * t - 2.0) * h * self.m_hi)
            / (h * h)
    }

    /// Coefficients `[a, b, c]` of q'(x) written as `a t^2 + b t + c`
    pub const fn derivative_coefficients(&self) -> [f64; 3] {
        let h = self.h;
        let a = (6.0 * self.y_lo + 3.0 * h * self.m_lo - 6.0 * self.y_hi + 3.0 * h * self.m_hi) / h;
        let b =
            (-6.0 * self.y_lo - 4.0 * h * self.m_lo + 6.0 * self.y_hi - 2.0 * h * self.m_hi) / h;
        [a, b, self.m_lo]
    }

    /// Integral of x q'(x) over the segment
    ///
    /// With x = g + h t the integrand is a cubic in t on [0, 1], so the
    /// integral is exact.
    pub const fn first_moment(&self) -> f64 {
        let [a, b, c] = self.derivative_coefficients();
        let g = self.x_lo;
        let h = self.h;

        h * (a * h / 4.0 + (a * g + b * h) / 3.0 + (b * g + c * h) / 2.0 + c * g)
    }

    /// Integral of x^2 q'(x) over the segment
    pub const fn second_moment(&self) -> f64 {
        let [a, b, c] = self.derivative_coefficients();
        let g = self.x_lo;
        let h = self.h;
        let g2 = g * g;
        let h2 = h * h;

        h * (a * h2 / 5.0
            + (b * h2 + 2.0 * a * g * h) / 4.0
            + (c * h2 + 2.0 * b * g * h + a * g2) / 3.0
            + (2.0 * c * g * h + b * g2) / 2.0
            + c * g2)
    }
}
