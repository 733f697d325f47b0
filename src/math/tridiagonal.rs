//! Tridiagonal linear systems solved by forward elimination and back substitution
//!
//! No pivoting is performed, so callers are expected to build diagonally
//! dominant systems (spline continuity equations are).

use crate::io::error::{Result, SplineError, invalid_argument};
use ndarray::{Array1, ArrayView1};

/// Solve `A u = rhs` for tridiagonal `A`
///
/// `sub`, `diag` and `rhs` have length n. `sup` has length n or n - 1.
/// `sub[0]` and `sup[n - 1]` take no part in the system.
///
/// # Errors
///
/// Returns an error if:
/// - The coefficient lengths are inconsistent
/// - A pivot is exactly zero during elimination
pub fn solve_tridiagonal(
    sub: ArrayView1<'_, f64>,
    diag: ArrayView1<'_, f64>,
    sup: ArrayView1<'_, f64>,
    rhs: ArrayView1<'_, f64>,
) -> Result<Array1<f64>> {
    let n = diag.len();
    if sub.len() != n || rhs.len() != n {
        return Err(invalid_argument(
            "sub/rhs",
            &format!("{}/{}", sub.len(), rhs.len()),
            &format!("must match diagonal length {n}"),
        ));
    }
    if sup.len() != n && sup.len() + 1 != n {
        return Err(invalid_argument(
            "sup",
            &sup.len(),
            &format!("must have length {n} or {}", n.saturating_sub(1)),
        ));
    }

    let (Some(&first_diag), Some(&first_rhs)) = (diag.get(0), rhs.get(0)) else {
        return Ok(Array1::zeros(0));
    };

    let mut pivot = first_diag;
    if pivot == 0.0 {
        return Err(SplineError::SingularSystem { row: 0 });
    }

    let mut gammas = Vec::with_capacity(n.saturating_sub(1));
    let mut sweep = Vec::with_capacity(n);
    let mut previous = first_rhs / pivot;
    sweep.push(previous);

    // Row j pairs with the super-diagonal entry of row j - 1
    for (offset, (((&lower, &main), &value), &upper)) in sub
        .iter()
        .zip(diag.iter())
        .zip(rhs.iter())
        .skip(1)
        .zip(sup.iter())
        .enumerate()
    {
        let gamma = upper / pivot;
        pivot = lower.mul_add(-gamma, main);
        if pivot == 0.0 {
            return Err(SplineError::SingularSystem { row: offset + 1 });
        }
        previous = lower.mul_add(-previous, value) / pivot;
        gammas.push(gamma);
        sweep.push(previous);
    }

    let mut next = previous;
    for (value, &gamma) in sweep.iter_mut().rev().skip(1).zip(gammas.iter().rev()) {
        *value = gamma.mul_add(-next, *value);
        next = *value;
    }

    Ok(Array1::from_vec(sweep))
}

/// Row-by-row builder for a tridiagonal system
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    sub: Array1<f64>,
    diag: Array1<f64>,
    sup: Array1<f64>,
    rhs: Array1<f64>,
}

impl TridiagonalSystem {
    /// Create an all-zero system with `n` unknowns
    pub fn zeros(n: usize) -> Self {
        Self {
            sub: Array1::zeros(n),
            diag: Array1::zeros(n),
            sup: Array1::zeros(n),
            rhs: Array1::zeros(n),
        }
    }

    /// Number of unknowns
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// Whether the system has no unknowns
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Set row `row` to `lower * u[row - 1] + main * u[row] + upper * u[row + 1] = value`
    ///
    /// # Errors
    ///
    /// Returns an error if `row` is outside the system
    pub fn set_row(
        &mut self,
        row: usize,
        lower: f64,
        main: f64,
        upper: f64,
        value: f64,
    ) -> Result<()> {
        let n = self.len();
        let out_of_range = || invalid_argument("row", &row, &format!("system has {n} rows"));
        *self.sub.get_mut(row).ok_or_else(out_of_range)? = lower;
        *self.diag.get_mut(row).ok_or_else(out_of_range)? = main;
        *self.sup.get_mut(row).ok_or_else(out_of_range)? = upper;
        *self.rhs.get_mut(row).ok_or_else(out_of_range)? = value;
        Ok(())
    }

    /// Pin unknown `row` to `value`
    ///
    /// # Errors
    ///
    /// Returns an error if `row` is outside the system
    pub fn pin(&mut self, row: usize, value: f64) -> Result<()> {
        self.set_row(row, 0.0, 1.0, 0.0, value)
    }

    /// Solve the system
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::SingularSystem`] if elimination meets a zero pivot
    pub fn solve(&self) -> Result<Array1<f64>> {
        solve_tridiagonal(
            self.sub.view(),
            self.diag.view(),
            self.sup.view(),
            self.rhs.view(),
        )
    }
}
