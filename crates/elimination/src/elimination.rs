use nalgebra::{
    allocator::Allocator, DefaultAllocator, Dim, Matrix, OMatrix, OVector, RealField, Scalar,
    Storage, U1,
};

/// Result of a solve on a copy of the augmented matrix.
#[derive(Clone, Debug)]
pub struct Elimination<T, R, C>
where
    T: Scalar,
    R: Dim,
    C: Dim,
    DefaultAllocator: Allocator<T, R> + Allocator<T, R, C>,
{
    /// The augmented matrix after elimination: upper-triangular for Gauss, reduced row-echelon
    /// for Gauss-Jordan.
    pub reduced: OMatrix<T, R, C>,
    pub solution: OVector<T, R>,
}

impl<T, R, C> Elimination<T, R, C>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    DefaultAllocator: Allocator<T, R> + Allocator<T, R, C>,
{
    /// `false` if any solution component is `inf` or `NaN`, which is how an unchecked solve
    /// reports a singular system.
    pub fn is_finite(&self) -> bool {
        self.solution.iter().all(|x| x.is_finite())
    }
}

/// Computes `A x - b` for the augmented matrix `[A | b]`.
///
/// `mat` has to be the matrix as it was before elimination.
pub fn residual<T, R, C, SA, SB>(
    mat: &Matrix<T, R, C, SA>,
    x: &Matrix<T, R, U1, SB>,
) -> OVector<T, R>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    SA: Storage<T, R, C>,
    SB: Storage<T, R, U1>,
    DefaultAllocator: Allocator<T, R>,
{
    let (nrows, _) = mat.shape_generic();
    let n = mat.nrows();
    OVector::<T, R>::from_fn_generic(nrows, U1, |i, _| {
        let ax = (0..n).fold(T::zero(), |acc, j| acc + mat[(i, j)] * x[j]);
        ax - mat[(i, n)]
    })
}
