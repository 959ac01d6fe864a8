#![allow(non_snake_case)]

use super::{band_entries, project};
use crate::algebra::*;
use crate::settings::SparseSettings;

/// Square sparse diagonal matrix.
///
/// Only band 0 may hold entries, so [`set`](DiagonalMatrix::set) and
/// [`entry_mut`](DiagonalMatrix::entry_mut) require `i == j`.  Reads go
/// through the underlying [`BandedMatrix`], and transposition leaves the
/// matrix unchanged.
///
/// ```
/// use bandsparse::algebra::*;
///
/// let mut D = DiagonalMatrix::<f64>::new(3, 3);
/// D.set_diag(0, 1.);
/// D.set_diag(1, 2.);
/// D.set_diag(2, 3.);
///
/// let b = Matrix::from(&[[2.], [4.], [9.]]);
/// let mut x = Matrix::<f64>::zeros((3, 1));
/// D.solve(&mut x, &b).unwrap();
/// assert_eq!(x.data, vec![2., 2., 3.]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "super::WrappedBands<T>",
        bound(deserialize = "T: FloatT + serde::Deserialize<'de>")
    )
)]
pub struct DiagonalMatrix<T = f64> {
    inner: BandedMatrix<T>,
}

impl_band_wrapper!(DiagonalMatrix, BandStructure::Diagonal);

impl<T> DiagonalMatrix<T>
where
    T: FloatT,
{
    /// An empty `k x k` diagonal matrix with `k = min(m, n)`
    pub fn new(m: usize, n: usize) -> Self {
        let k = m.min(n);
        Self {
            inner: BandedMatrix::with_structure(k, k, BandStructure::Diagonal),
        }
    }

    /// `i`-th diagonal entry
    pub fn get_diag(&self, i: usize) -> T {
        self.inner.get(i, i)
    }

    /// Sets the `i`-th diagonal entry.  Zero deletes it.
    pub fn set_diag(&mut self, i: usize, v: T) {
        self.inner.set(i, i, v);
    }

    /// # Panics
    /// Panics if `i != j` or the index is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        assert_eq!(i, j, "diagonal matrix entries require i == j");
        self.inner.set(i, j, v);
    }

    /// # Panics
    /// Panics if `i != j` or the index is out of bounds.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut T {
        assert_eq!(i, j, "diagonal matrix entries require i == j");
        self.inner.entry_mut(i, j)
    }

    /// Replaces every diagonal entry by its reciprocal.
    ///
    /// Returns [`SolveError::RankDeficient`] and leaves the matrix untouched
    /// unless every diagonal entry is stored.
    pub fn invert(&mut self) -> Result<(), SolveError> {
        self.inner.check_full_diagonal(self.inner.m)?;
        if let Some(diag) = self.inner.data.get_mut(&0) {
            diag.values_mut().for_each(|v| *v = T::recip(*v));
        }
        Ok(())
    }

    /// As [`invert`](DiagonalMatrix::invert), printing the failure when
    /// `settings.verbose` is set.
    pub fn invert_with(&mut self, settings: &SparseSettings) -> Result<(), SolveError> {
        let result = self.invert();
        if let Err(ref e) = result {
            crate::io::report_failure(settings, e);
        }
        result
    }
}

impl<T: FloatT> LinearSolve<T> for DiagonalMatrix<T> {
    /// Element-wise solve `x(i,:) = b(i,:) / d_i`.
    ///
    /// # Panics
    /// Panics unless `x` and `b` both have one row per diagonal entry and
    /// the same number of columns.
    fn solve<X, B>(&self, x: &mut X, b: &B) -> Result<(), SolveError>
    where
        X: DenseMatrix<T>,
        B: DenseMatrix<T>,
    {
        let A = &self.inner;
        assert_eq!(b.nrows(), A.m);
        assert_eq!(x.nrows(), A.m);
        assert_eq!(x.ncols(), b.ncols());

        A.check_full_diagonal(b.nrows())?;

        if let Some(diag) = A.data.get(&0) {
            for (&i, &d) in diag.iter() {
                for k in 0..b.ncols() {
                    x[(i, k)] = b.get(i, k) / d;
                }
            }
        }
        Ok(())
    }
}

impl<T: FloatT> From<&SparseMatrix<T>> for DiagonalMatrix<T> {
    fn from(A: &SparseMatrix<T>) -> Self {
        let (m, n) = A.size();
        Self {
            inner: project(BandStructure::Diagonal, m, n, A.iter()),
        }
    }
}

impl<T: FloatT> From<&BandedMatrix<T>> for DiagonalMatrix<T> {
    fn from(A: &BandedMatrix<T>) -> Self {
        let (m, n) = A.size();
        Self {
            inner: project(BandStructure::Diagonal, m, n, band_entries(A, 0, 0)),
        }
    }
}
