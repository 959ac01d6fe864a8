#![allow(non_snake_case)]

use crate::algebra::{FloatT, MatrixShape, SolveError};
use crate::settings::SparseSettings;
use std::ops::{Index, IndexMut};

/// Dimension queries shared by every matrix type in the crate.
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn shape(&self) -> MatrixShape;
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}

//NB: the sparse engine never assumes a contiguous layout for dense
//operands.  Only indexing, construction of zeros and the shape are
//required, so any dense container can take part in products and solves.

/// Dense matrix collaborator consumed and produced by the sparse products
/// and the band solvers.
pub trait DenseMatrix<T>:
    ShapedMatrix + Index<(usize, usize), Output = T> + IndexMut<(usize, usize)>
where
    T: FloatT,
{
    /// an `m x n` matrix of zeros
    fn zeros(size: (usize, usize)) -> Self
    where
        Self: Sized;

    /// value at `(i,j)`
    #[inline]
    fn get(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

/// In-place scalar operations and norms on sparse storage
pub trait MatrixMath<T> {
    /// scale every stored entry by `c`.  Scaling by zero empties the matrix.
    fn scale(&mut self, c: T);

    /// negate every stored entry
    fn negate(&mut self);

    /// Frobenius norm of the stored entries
    fn norm2(&self) -> T;
}

/// Direct solution of `A x = b` for matrices with a solvable band pattern.
///
/// Implemented only by the diagonal and triangular band matrices; a general
/// banded matrix has no direct solver.
pub trait LinearSolve<T: FloatT> {
    /// Solves `A x = b` column by column.
    ///
    /// Returns [`SolveError::RankDeficient`] and leaves `x` untouched when the
    /// diagonal band does not hold one entry per row.
    ///
    /// # Panics
    /// Panics if the row dimensions of `x` and `b` do not match the matrix.
    fn solve<X, B>(&self, x: &mut X, b: &B) -> Result<(), SolveError>
    where
        X: DenseMatrix<T>,
        B: DenseMatrix<T>;

    /// As [`solve`](LinearSolve::solve), additionally printing the failure
    /// diagnostic when `settings.verbose` is set.
    fn solve_with<X, B>(&self, x: &mut X, b: &B, settings: &SparseSettings) -> Result<(), SolveError>
    where
        X: DenseMatrix<T>,
        B: DenseMatrix<T>,
    {
        let result = self.solve(x, b);
        if let Err(ref e) = result {
            crate::io::report_failure(settings, e);
        }
        result
    }
}
