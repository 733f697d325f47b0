//! Sample ingestion and the quantile-sampled empirical CDF

use crate::io::configuration::{TRIM_DIVISOR, TRIM_THRESHOLD};
use crate::io::error::{Result, invalid_format};
use num_traits::ToPrimitive;

/// Input shapes accepted as raw samples
pub trait IntoSamples {
    /// Canonical sample vector
    ///
    /// # Errors
    ///
    /// Returns [`crate::SplineError::InvalidFormat`] if any value is not a finite number
    fn into_samples(self) -> Result<Vec<f64>>;
}

fn coerce<T: ToPrimitive>(value: T) -> Result<f64> {
    match value.to_f64() {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(invalid_format(&format!("sample {v} is not a finite number"))),
        None => Err(invalid_format(
            &"failed to acquire data as floating point vector",
        )),
    }
}

macro_rules! scalar_samples {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoSamples for $t {
                fn into_samples(self) -> Result<Vec<f64>> {
                    Ok(vec![coerce(self)?])
                }
            }
        )*
    };
}

scalar_samples!(
    f64, f32, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

impl<T: ToPrimitive + Copy> IntoSamples for &[T] {
    fn into_samples(self) -> Result<Vec<f64>> {
        self.iter().map(|&v| coerce(v)).collect()
    }
}

impl<T: ToPrimitive + Copy> IntoSamples for &Vec<T> {
    fn into_samples(self) -> Result<Vec<f64>> {
        self.as_slice().into_samples()
    }
}

impl<T: ToPrimitive> IntoSamples for Vec<T> {
    fn into_samples(self) -> Result<Vec<f64>> {
        self.into_iter().map(coerce).collect()
    }
}

impl<T: ToPrimitive, const N: usize> IntoSamples for [T; N] {
    fn into_samples(self) -> Result<Vec<f64>> {
        self.into_iter().map(coerce).collect()
    }
}

/// Number of extreme samples dropped from each end of a sorted set of `n`
pub fn trim_count(n: usize) -> usize {
    if n > TRIM_THRESHOLD {
        1 + ((n as f64).sqrt() / TRIM_DIVISOR) as usize
    } else {
        0
    }
}

/// Thinned empirical CDF knots `(value, probability)` from sorted samples
///
/// Probabilities are rank counts over `n + 1`, where `n` is the untrimmed
/// sample count, so the largest sample never maps to 1. A knot is emitted
/// for a distinct value only once its probability reaches the cursor, and
/// the cursor then moves up in whole `resolution` steps past it. The last
/// distinct value is always emitted.
pub fn sampled_cdf(sorted: &[f64], resolution: f64) -> Vec<(f64, f64)> {
    let n = sorted.len();
    let trim = trim_count(n);
    let kept = sorted.get(trim..n.saturating_sub(trim)).unwrap_or_default();
    let Some(&first) = kept.first() else {
        return Vec::new();
    };

    let scale = 1.0 + n as f64;
    let mut knots = Vec::new();
    let mut current = first;
    let mut cursor = 0.0;
    let mut rank = trim;

    for &value in kept {
        if value > current {
            let probability = rank as f64 / scale;
            if probability >= cursor {
                knots.push((current, probability));
                while cursor <= probability {
                    cursor += resolution;
                }
            }
            current = value;
        }
        rank += 1;
    }
    knots.push((current, rank as f64 / scale));

    knots
}
