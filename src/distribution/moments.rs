//! Mean and variance of a fitted CDF by exact integration

use crate::math::hermite::HermiteSegment;
use crate::math::probability::ExponentialTail;
use serde::{Deserialize, Serialize};

/// First two moments of a fitted distribution
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// E[X]
    pub mean: f64,
    /// E[X^2] - E[X]^2, never negative
    pub variance: f64,
}

impl Moments {
    /// Integrate x pdf(x) and x^2 pdf(x) over every segment and tail
    ///
    /// The density on each segment is the derivative of the Hermite cubic,
    /// so both integrals are exact polynomials.
    pub fn integrate<'a, I>(segments: &[HermiteSegment], tails: I) -> Self
    where
        I: IntoIterator<Item = &'a ExponentialTail>,
    {
        let (mut first, mut second) = segments.iter().fold((0.0, 0.0), |(ex, ex2), segment| {
            (ex + segment.first_moment(), ex2 + segment.second_moment())
        });
        for tail in tails {
            first += tail.first_moment();
            second += tail.second_moment();
        }

        // Cancellation can push this slightly below zero
        let variance = first.mul_add(-first, second).max(0.0);
        Self {
            mean: first,
            variance,
        }
    }
}
