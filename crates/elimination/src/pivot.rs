use log::{trace, warn};
use nalgebra::{Dim, Matrix, RealField, Storage, StorageMut};

use crate::Error;

/// Finds the pivot row for elimination step `k`.
///
/// Scans rows `k..n` of column `k` and returns the row holding the entry of largest magnitude.
/// The search starts from row `k` itself and only a strictly larger magnitude replaces the
/// current candidate, so the first of several equal maxima wins.
///
/// If every candidate is zero, `k` is returned unchanged; callers have to treat this as a
/// singular column.
pub fn select_pivot_row<T, R, C, S>(mat: &Matrix<T, R, C, S>, k: usize) -> usize
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    let col_k = mat.column(k);

    let mut l = k;
    let mut max = col_k[k].abs();
    for i in (k + 1)..mat.nrows() {
        if col_k[i].abs() > max {
            max = col_k[i].abs();
            l = i;
        }
    }
    l
}

/// Selects the pivot for step `k`, swaps it into row `k` and returns the pivot value.
///
/// A zero pivot is only logged; deciding whether that is an error is left to the caller.
pub(crate) fn pivot_step<T, R, C, S>(mat: &mut Matrix<T, R, C, S>, k: usize) -> T
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
{
    let l = select_pivot_row(mat, k);

    // swap the full rows, right hand side included
    if l != k {
        trace!("step {}: swap rows {} and {}", k, k, l);
        mat.swap_rows(k, l);
    }

    let pivot = mat[(k, k)];
    if pivot == T::zero() {
        warn!("zero pivot in column {}, solution will not be finite", k);
    }
    pivot
}

/// Rejects a pivot whose magnitude does not exceed `pivot_tol`. A `NaN` pivot is always rejected.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn check_pivot<T: RealField + Copy>(
    pivot: T,
    k: usize,
    pivot_tol: T,
) -> Result<(), Error> {
    if !(pivot.abs() > pivot_tol) {
        return Err(Error::SingularMatrix { col: k });
    }
    Ok(())
}

/// A pivot tolerance has to be a non-negative number.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn check_tolerance<T: RealField + Copy>(pivot_tol: T) -> Result<(), Error> {
    if !(pivot_tol >= T::zero()) {
        return Err(Error::InvalidTolerance);
    }
    Ok(())
}
