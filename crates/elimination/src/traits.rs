use nalgebra::{
    allocator::Allocator, DefaultAllocator, Dim, Matrix, OVector, RealField, Storage, StorageMut,
};
use num_traits::Zero;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{Elimination, EliminationKind, Error};

/// Selects how much checking a solver does before and during elimination.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Validation<T> {
    /// No checks. Singular systems show up as `inf`/`NaN` in the solution.
    Unchecked,
    /// Validate the shape and entries of the augmented matrix, and reject any pivot with
    /// magnitude `<= pivot_tol` as singular.
    Checked { pivot_tol: T },
}

impl<T: Zero> Validation<T> {
    /// Checked mode that only rejects exactly-zero pivots.
    pub fn checked() -> Self {
        Validation::Checked {
            pivot_tol: T::zero(),
        }
    }
}

impl<T> Default for Validation<T> {
    fn default() -> Self {
        Validation::Unchecked
    }
}

pub trait EliminationSolver<T>
where
    T: RealField + Copy,
{
    fn kind(&self) -> EliminationKind;

    /// Solves the augmented system `[A | b]` held in `mat`, overwriting it with the reduced form.
    ///
    /// ## Returns
    /// * `Ok(x)` the solution vector. In [`Validation::Unchecked`] mode this is always `Ok`, and a
    ///     singular system gives a non-finite `x`.
    /// * `Err(_)` in [`Validation::Checked`] mode, for a malformed or singular system. `mat` may
    ///     have been partially reduced.
    fn solve_in_place<R, C, S>(&self, mat: &mut Matrix<T, R, C, S>) -> Result<OVector<T, R>, Error>
    where
        R: Dim,
        C: Dim,
        S: StorageMut<T, R, C>,
        DefaultAllocator: Allocator<T, R>;

    /// Solves the augmented system `[A | b]` without touching `mat`.
    ///
    /// The elimination runs on an owned copy which is returned along with the solution.
    fn solve<R, C, S>(&self, mat: &Matrix<T, R, C, S>) -> Result<Elimination<T, R, C>, Error>
    where
        R: Dim,
        C: Dim,
        S: Storage<T, R, C>,
        DefaultAllocator: Allocator<T, R> + Allocator<T, R, C>,
    {
        let mut reduced = mat.clone_owned();
        let solution = self.solve_in_place(&mut reduced)?;
        Ok(Elimination { reduced, solution })
    }
}
