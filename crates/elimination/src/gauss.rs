//! Gaussian elimination with partial pivoting, followed by back substitution.
//!
use log::trace;
use nalgebra::{
    allocator::Allocator, DefaultAllocator, Dim, Matrix, OVector, RealField, Storage, StorageMut,
    U1,
};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    pivot::{check_pivot, check_tolerance, pivot_step},
    validate_augmented, EliminationKind, EliminationSolver, Error, Validation,
};

/// Gaussian elimination solver.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gauss<T> {
    validation: Validation<T>,
}

impl<T> Gauss<T> {
    /// Creates a new solver that performs no validation.
    pub fn new() -> Self {
        Gauss {
            validation: Validation::Unchecked,
        }
    }

    pub fn with_validation(validation: Validation<T>) -> Self {
        Gauss { validation }
    }

    pub fn validation(&self) -> &Validation<T> {
        &self.validation
    }
}

impl<T> Default for Gauss<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EliminationSolver<T> for Gauss<T>
where
    T: RealField + Copy,
{
    fn kind(&self) -> EliminationKind {
        EliminationKind::Gauss
    }

    fn solve_in_place<R, C, S>(&self, mat: &mut Matrix<T, R, C, S>) -> Result<OVector<T, R>, Error>
    where
        R: Dim,
        C: Dim,
        S: StorageMut<T, R, C>,
        DefaultAllocator: Allocator<T, R>,
    {
        match self.validation {
            Validation::Unchecked => Ok(gauss(mat)),
            Validation::Checked { pivot_tol } => gauss_checked(mat, pivot_tol),
        }
    }
}

/// Solves the augmented system `[A | b]` held in `mat` by Gaussian elimination.
///
/// `mat` is reduced in place to upper-triangular form (rows swapped and combined), so its
/// original contents are lost. A singular system is not detected: the returned vector then
/// contains `inf` or `NaN` entries.
pub fn gauss<T, R, C, S>(mat: &mut Matrix<T, R, C, S>) -> OVector<T, R>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
    DefaultAllocator: Allocator<T, R>,
{
    forward_eliminate(mat);
    back_substitute(mat)
}

/// Like [`gauss`], but validates the shape and entries of `mat` first and fails with
/// [`Error::SingularMatrix`] on any pivot with magnitude `<= pivot_tol` (or `NaN`).
pub fn gauss_checked<T, R, C, S>(
    mat: &mut Matrix<T, R, C, S>,
    pivot_tol: T,
) -> Result<OVector<T, R>, Error>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
    DefaultAllocator: Allocator<T, R>,
{
    check_tolerance(pivot_tol)?;
    validate_augmented(mat)?;

    let n = mat.nrows();
    for k in 0..n.saturating_sub(1) {
        let pivot = pivot_step(mat, k);
        check_pivot(pivot, k, pivot_tol)?;
        eliminate_below(mat, k, pivot);
    }

    // the last diagonal entry is never visited as a pivot by forward elimination
    if n > 0 {
        check_pivot(mat[(n - 1, n - 1)], n - 1, pivot_tol)?;
    }

    Ok(back_substitute(mat))
}

/// Reduces the augmented matrix `mat` to upper-triangular form in place.
///
/// For each step `k = 0, 1, ..., n-2` the row with the largest magnitude in column `k` (at or
/// below row `k`) is swapped into row `k`, then `row_i -= (a(i,k)/a(k,k)) row_k` for every
/// `i > k`, over columns `k..=n` so that the right hand side is carried along.
///
/// Entries below the diagonal are left as computed and may hold rounding residue rather than an
/// exact zero. A zero pivot is not an error here; it turns the affected rows into `inf`/`NaN`.
pub fn forward_eliminate<T, R, C, S>(mat: &mut Matrix<T, R, C, S>)
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
{
    // k-th elimination step number
    for k in 0..mat.nrows().saturating_sub(1) {
        let pivot = pivot_step(mat, k);
        eliminate_below(mat, k, pivot);
    }
}

/// row_i = row_i - [a(i,k)/a(k,k)] row_k, i=k+1, ..., n-1
fn eliminate_below<T, R, C, S>(mat: &mut Matrix<T, R, C, S>, k: usize, pivot: T)
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
{
    trace!("gauss step {}: pivot {:?}", k, pivot);
    let n = mat.nrows();

    for i in (k + 1)..n {
        let factor = mat[(i, k)] / pivot;
        for j in k..=n {
            let a_kj = mat[(k, j)];
            mat[(i, j)] -= factor * a_kj;
        }
    }
}

/// Solves the upper-triangular augmented system left in `mat` by [`forward_eliminate`].
///
/// `x(i) = (a(i,n) - sum_{j>i} a(i,j) x(j)) / a(i,i)`, for `i = n-1` down to `0`. A zero on the
/// diagonal gives a non-finite `x(i)` which then spreads to every earlier component.
pub fn back_substitute<T, R, C, S>(mat: &Matrix<T, R, C, S>) -> OVector<T, R>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    DefaultAllocator: Allocator<T, R>,
{
    let (nrows, _) = mat.shape_generic();
    let n = mat.nrows();
    let mut x = OVector::<T, R>::zeros_generic(nrows, U1);

    for i in (0..n).rev() {
        let mut xi = mat[(i, n)];
        for j in (i + 1)..n {
            xi -= mat[(i, j)] * x[j];
        }
        x[i] = xi / mat[(i, i)];
    }

    x
}
