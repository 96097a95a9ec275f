//! Dense solvers for linear systems `Ax = b` given as an augmented matrix `[A | b]`.
//!
//! Two elimination schemes are provided, both using partial (row) pivoting:
//!
//! * [`gauss`]: forward elimination to upper-triangular form followed by back substitution.
//! * [`gauss_jordan`]: full reduction, leaving the solution in the last column.
//!
//! The free functions work in place and never fail: a zero pivot produces `inf`/`NaN` entries in
//! the solution rather than an error. The `*_checked` variants and the [`Validation::Checked`]
//! mode of the solver types report singular or malformed systems through [`Error`] instead.
mod elimination;
mod gauss;
mod gauss_jordan;
mod pivot;
mod traits;

pub use elimination::{residual, Elimination};
pub use gauss::{back_substitute, forward_eliminate, gauss, gauss_checked, Gauss};
pub use gauss_jordan::{gauss_jordan, gauss_jordan_checked, GaussJordan};
pub use pivot::select_pivot_row;
pub use traits::{EliminationSolver, Validation};

use nalgebra::{Dim, Matrix, RealField, Storage};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("A singular matrix was encountered during elimination (col {col})")]
    SingularMatrix { col: usize },

    #[error("Augmented matrix must have one more column than rows (got {rows}x{cols})")]
    DimensionMismatch { rows: usize, cols: usize },

    #[error("Pivot tolerance must be a non-negative number")]
    InvalidTolerance,

    #[error("Non-finite entry in augmented matrix at ({row}, {col})")]
    NonFiniteEntry { row: usize, col: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EliminationKind {
    /// Forward elimination and back substitution.
    Gauss,
    /// Reduction to reduced row-echelon form.
    GaussJordan,
}

/// Checks that `mat` is an `n x (n + 1)` augmented matrix with only finite entries.
pub fn validate_augmented<T, R, C, S>(mat: &Matrix<T, R, C, S>) -> Result<(), Error>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    let (rows, cols) = mat.shape();
    if cols != rows + 1 {
        return Err(Error::DimensionMismatch { rows, cols });
    }

    for col in 0..cols {
        for row in 0..rows {
            if !mat[(row, col)].is_finite() {
                return Err(Error::NonFiniteEntry { row, col });
            }
        }
    }

    Ok(())
}
