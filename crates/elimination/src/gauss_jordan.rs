//! Gauss-Jordan elimination with partial pivoting.
//!
//! Every pivot row is normalized to a leading one and its column is eliminated from all other
//! rows, above and below. After the last step the coefficient block is the identity and the
//! right hand side column holds the solution.
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

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussJordan<T> {
    validation: Validation<T>,
}

impl<T> GaussJordan<T> {
    pub fn new() -> Self {
        GaussJordan {
            validation: Validation::Unchecked,
        }
    }

    pub fn with_validation(validation: Validation<T>) -> Self {
        GaussJordan { validation }
    }

    pub fn validation(&self) -> &Validation<T> {
        &self.validation
    }
}

impl<T> Default for GaussJordan<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EliminationSolver<T> for GaussJordan<T>
where
    T: RealField + Copy,
{
    fn kind(&self) -> EliminationKind {
        EliminationKind::GaussJordan
    }

    fn solve_in_place<R, C, S>(&self, mat: &mut Matrix<T, R, C, S>) -> Result<OVector<T, R>, Error>
    where
        R: Dim,
        C: Dim,
        S: StorageMut<T, R, C>,
        DefaultAllocator: Allocator<T, R>,
    {
        match self.validation {
            Validation::Unchecked => Ok(gauss_jordan(mat)),
            Validation::Checked { pivot_tol } => gauss_jordan_checked(mat, pivot_tol),
        }
    }
}

/// Solves the augmented system `[A | b]` held in `mat` by Gauss-Jordan elimination.
///
/// `mat` is left in reduced row-echelon form. The solution is read from the last column in row
/// order. A zero pivot column is not detected and yields `inf`/`NaN` entries.
pub fn gauss_jordan<T, R, C, S>(mat: &mut Matrix<T, R, C, S>) -> OVector<T, R>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
    DefaultAllocator: Allocator<T, R>,
{
    for k in 0..mat.nrows() {
        let pivot = pivot_step(mat, k);
        reduce_column(mat, k, pivot);
    }
    last_column(mat)
}

/// Like [`gauss_jordan`], but validates `mat` first and fails with [`Error::SingularMatrix`] on
/// any pivot with magnitude `<= pivot_tol` (or `NaN`).
pub fn gauss_jordan_checked<T, R, C, S>(
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

    for k in 0..mat.nrows() {
        let pivot = pivot_step(mat, k);
        check_pivot(pivot, k, pivot_tol)?;
        reduce_column(mat, k, pivot);
    }
    Ok(last_column(mat))
}

/// Normalizes pivot row `k` and eliminates column `k` from every other row.
fn reduce_column<T, R, C, S>(mat: &mut Matrix<T, R, C, S>, k: usize, pivot: T)
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
{
    trace!("gauss-jordan step {}: pivot {:?}", k, pivot);
    let n = mat.nrows();

    // normalize the pivot row, a(k,k) becomes 1
    for j in k..=n {
        mat[(k, j)] /= pivot;
    }

    for i in (0..n).filter(|&i| i != k) {
        let factor = mat[(i, k)];
        for j in k..=n {
            let a_kj = mat[(k, j)];
            mat[(i, j)] -= factor * a_kj;
        }
    }
}

fn last_column<T, R, C, S>(mat: &Matrix<T, R, C, S>) -> OVector<T, R>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    DefaultAllocator: Allocator<T, R>,
{
    let (nrows, _) = mat.shape_generic();
    let n = mat.nrows();
    OVector::<T, R>::from_fn_generic(nrows, U1, |i, _| mat[(i, n)])
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{matrix, vector};

    use super::*;

    #[test]
    fn test_gauss_jordan1() {
        let mut mat = matrix![
            2.0, 1.0, 1.0, 5.0;
            4.0, -6.0, 0.0, -2.0;
            -2.0, 7.0, 2.0, 9.0;
        ];
        let x = gauss_jordan(&mut mat);
        assert_relative_eq!(x, vector![1.0, 1.0, 2.0], max_relative = 1e-9);

        // the coefficient block is reduced to the identity
        let expect = matrix![
            1.0, 0.0, 0.0, 1.0;
            0.0, 1.0, 0.0, 1.0;
            0.0, 0.0, 1.0, 2.0;
        ];
        assert_relative_eq!(mat, expect, epsilon = 1e-12);
    }

    #[test]
    fn test_gauss_jordan_single() {
        let mut mat = matrix![2.0, 10.0];
        assert_eq!(gauss_jordan(&mut mat), vector![5.0]);
        assert_eq!(mat, matrix![1.0, 5.0]);
    }

    #[test]
    fn test_gauss_jordan_singular() {
        let mut mat = matrix![
            0.0, 0.0, 1.0;
            0.0, 0.0, 1.0;
        ];
        let x = gauss_jordan(&mut mat);
        assert!(x.iter().all(|v: &f64| !v.is_finite()));
    }

    #[test]
    fn test_gauss_jordan_checked() {
        let mut mat = matrix![
            1.0, 1.0, 2.0;
            1.0, 1.0, 2.0;
        ];
        assert_eq!(
            gauss_jordan_checked(&mut mat, 0.0),
            Err(Error::SingularMatrix { col: 1 })
        );

        let mut mat = matrix![
            1.0, f64::NAN, 2.0;
            1.0, 1.0, 2.0;
        ];
        assert_eq!(
            gauss_jordan_checked(&mut mat, 0.0),
            Err(Error::NonFiniteEntry { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_gauss_jordan_checked_nan() {
        let singular = matrix![
            0.0, 0.0, 1.0;
            0.0, 0.0, 1.0;
        ];
        assert_eq!(
            gauss_jordan_checked(&mut singular.clone(), f64::NAN),
            Err(Error::InvalidTolerance)
        );

        // column 1 overflows to inf in both lower rows, so step 1 leaves a NaN pivot in row 2
        let mut mat = matrix![
            1e308, 1e308, 1e308, 1.0;
            -1e308, 1e308, 1e308, 1.0;
            -1e308, 1e308, 1.0, 1.0;
        ];
        assert_eq!(
            gauss_jordan_checked(&mut mat, 0.0),
            Err(Error::SingularMatrix { col: 2 })
        );
    }

    #[test]
    fn test_gauss_jordan_solver() {
        let solver = GaussJordan::with_validation(Validation::Checked { pivot_tol: 1e-12 });
        let mut mat = matrix![
            1.0, 2.0, 5.0;
            3.0, 4.0, 6.0;
        ];
        let x = solver.solve_in_place(&mut mat).unwrap();
        assert_relative_eq!(x, vector![-4.0, 4.5], max_relative = 1e-9);
        assert_eq!(solver.kind(), EliminationKind::GaussJordan);
    }
}
