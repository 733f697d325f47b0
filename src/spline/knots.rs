//! Knot storage and input canonicalization
//!
//! Knots are kept in an ordered map keyed by abscissa. Entering a knot at an
//! existing abscissa silently replaces its ordinate.

use crate::io::error::{Result, SplineError, invalid_format};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Totally ordered abscissa usable as a map key
///
/// Negative zero is folded into positive zero so both address the same knot.
#[derive(Clone, Copy, Debug)]
pub struct Abscissa(f64);

impl Abscissa {
    /// Wrap an abscissa
    pub fn new(x: f64) -> Self {
        Self(if x == 0.0 { 0.0 } else { x })
    }

    /// Underlying value
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Abscissa {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Abscissa {}

impl PartialOrd for Abscissa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Abscissa {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Ordered mapping from abscissa to value
///
/// Used both for spline knots (x to y) and for fixed gradients (x to m).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<(f64, f64)>", from = "Vec<(f64, f64)>")]
pub struct KnotSet {
    points: BTreeMap<Abscissa, f64>,
}

impl KnotSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct abscissae
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no knots are stored
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enter one knot, replacing any existing value at `x`
    pub fn insert(&mut self, x: f64, y: f64) {
        self.points.insert(Abscissa::new(x), y);
    }

    /// Value stored at `x`, if any
    pub fn get(&self, x: f64) -> Option<f64> {
        self.points.get(&Abscissa::new(x)).copied()
    }

    /// Whether a knot exists at `x`
    pub fn contains(&self, x: f64) -> bool {
        self.points.contains_key(&Abscissa::new(x))
    }

    /// Drop all knots
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Knots in increasing abscissa order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|(x, &y)| (x.value(), y))
    }

    /// Sorted abscissae and their aligned values
    pub fn columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.iter().unzip()
    }
}

impl Extend<(f64, f64)> for KnotSet {
    fn extend<I: IntoIterator<Item = (f64, f64)>>(&mut self, iter: I) {
        for (x, y) in iter {
            self.insert(x, y);
        }
    }
}

impl FromIterator<(f64, f64)> for KnotSet {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl From<Vec<(f64, f64)>> for KnotSet {
    fn from(points: Vec<(f64, f64)>) -> Self {
        points.into_iter().collect()
    }
}

impl From<KnotSet> for Vec<(f64, f64)> {
    fn from(set: KnotSet) -> Self {
        set.iter().collect()
    }
}

/// Inputs that can be canonicalized into `(x, y)` knots
///
/// Supported shapes are a single point, a sequence of pairs, rows of two
/// values, and mappings from abscissa to value.
pub trait IntoKnots {
    /// Canonicalize into finite `(x, y)` pairs
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::InvalidFormat`] if the input cannot be read as points
    fn into_knots(self) -> Result<Vec<(f64, f64)>>;
}

const SUPPORTED_FORMATS: &str =
    "supported formats: [x, y], [[x1, y1], [x2, y2], ...], {x1 => y1, x2 => y2, ...}";

fn coerce<T: ToPrimitive>(value: &T) -> Result<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid_format(&format!("coordinate is not a finite float; {SUPPORTED_FORMATS}")))
}

fn finite_point(x: f64, y: f64) -> Result<(f64, f64)> {
    Ok((coerce(&x)?, coerce(&y)?))
}

fn point_from_row(row: &[f64]) -> Result<(f64, f64)> {
    match row {
        [x, y] => finite_point(*x, *y),
        _ => Err(SplineError::InvalidFormat {
            reason: format!("expected a pair, got {} values; {SUPPORTED_FORMATS}", row.len()),
        }),
    }
}

impl<X: ToPrimitive, Y: ToPrimitive> IntoKnots for (X, Y) {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        Ok(vec![(coerce(&self.0)?, coerce(&self.1)?)])
    }
}

impl IntoKnots for [f64; 2] {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        let [x, y] = self;
        Ok(vec![finite_point(x, y)?])
    }
}

impl IntoKnots for &[f64] {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        Ok(vec![point_from_row(self)?])
    }
}

impl IntoKnots for &[(f64, f64)] {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.iter().map(|&(x, y)| finite_point(x, y)).collect()
    }
}

impl IntoKnots for Vec<(f64, f64)> {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.as_slice().into_knots()
    }
}

impl<const N: usize> IntoKnots for [(f64, f64); N] {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.as_slice().into_knots()
    }
}

impl IntoKnots for &[[f64; 2]] {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.iter().map(|&[x, y]| finite_point(x, y)).collect()
    }
}

impl IntoKnots for Vec<[f64; 2]> {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.as_slice().into_knots()
    }
}

impl<const N: usize> IntoKnots for [[f64; 2]; N] {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.as_slice().into_knots()
    }
}

impl IntoKnots for &[Vec<f64>] {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.iter().map(|row| point_from_row(row)).collect()
    }
}

impl IntoKnots for Vec<Vec<f64>> {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.as_slice().into_knots()
    }
}

impl IntoKnots for &KnotSet {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.iter().map(|(x, y)| finite_point(x, y)).collect()
    }
}

impl IntoKnots for KnotSet {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        (&self).into_knots()
    }
}

impl<S: std::hash::BuildHasher> IntoKnots for &HashMap<String, f64, S> {
    fn into_knots(self) -> Result<Vec<(f64, f64)>> {
        self.iter()
            .map(|(key, &y)| {
                let x = key.trim().parse::<f64>().map_err(|error| {
                    invalid_format(&format!("key '{key}' is not a float ({error}); {SUPPORTED_FORMATS}"))
                })?;
                finite_point(x, y)
            })
            .collect()
    }
}
