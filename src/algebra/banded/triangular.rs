#![allow(non_snake_case)]

use super::{band_entries, project};
use crate::algebra::*;

/// Square sparse upper-triangular matrix, admitting bands `>= 0`.
///
/// Reads below the diagonal return zero without touching storage.
/// There is no in-place transpose, since it would change the pattern,
/// and [`transposed`](Self::transposed) returns an unchanged copy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "super::WrappedBands<T>",
        bound(deserialize = "T: FloatT + serde::Deserialize<'de>")
    )
)]
pub struct UpperTriangularMatrix<T = f64> {
    inner: BandedMatrix<T>,
}

/// Square sparse lower-triangular matrix, admitting bands `<= 0`.
///
/// Reads above the diagonal return zero without touching storage.
/// There is no in-place transpose, since it would change the pattern,
/// and [`transposed`](Self::transposed) returns an unchanged copy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "super::WrappedBands<T>",
        bound(deserialize = "T: FloatT + serde::Deserialize<'de>")
    )
)]
pub struct LowerTriangularMatrix<T = f64> {
    inner: BandedMatrix<T>,
}

impl_band_wrapper!(UpperTriangularMatrix, BandStructure::Triu);
impl_band_wrapper!(LowerTriangularMatrix, BandStructure::Tril);

impl<T> UpperTriangularMatrix<T>
where
    T: FloatT,
{
    /// An empty `k x k` matrix with `k = min(m, n)`
    pub fn new(m: usize, n: usize) -> Self {
        let k = m.min(n);
        Self {
            inner: BandedMatrix::with_structure(k, k, BandStructure::Triu),
        }
    }

    /// # Panics
    /// Panics if `j < i` or the index is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        assert!(j >= i, "upper triangular matrix entries require j >= i");
        self.inner.set(i, j, v);
    }

    /// # Panics
    /// Panics if `j < i` or the index is out of bounds.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut T {
        assert!(j >= i, "upper triangular matrix entries require j >= i");
        self.inner.entry_mut(i, j)
    }
}

impl<T> LowerTriangularMatrix<T>
where
    T: FloatT,
{
    /// An empty `k x k` matrix with `k = min(m, n)`
    pub fn new(m: usize, n: usize) -> Self {
        let k = m.min(n);
        Self {
            inner: BandedMatrix::with_structure(k, k, BandStructure::Tril),
        }
    }

    /// # Panics
    /// Panics if `j > i` or the index is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        assert!(j <= i, "lower triangular matrix entries require j <= i");
        self.inner.set(i, j, v);
    }

    /// # Panics
    /// Panics if `j > i` or the index is out of bounds.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut T {
        assert!(j <= i, "lower triangular matrix entries require j <= i");
        self.inner.entry_mut(i, j)
    }
}

fn _check_solve_dims<T, X, B>(A: &BandedMatrix<T>, x: &X, b: &B)
where
    T: FloatT,
    X: DenseMatrix<T>,
    B: DenseMatrix<T>,
{
    assert!(A.m >= A.n);
    assert_eq!(b.nrows(), A.m);
    assert_eq!(x.nrows(), A.n);
    assert_eq!(x.ncols(), b.ncols());
}

impl<T: FloatT> LinearSolve<T> for UpperTriangularMatrix<T> {
    /// Back substitution.
    ///
    /// Rows are resolved from the last to the first.  Each super-diagonal
    /// band keeps a cursor running backwards through its entries, which
    /// advances exactly once per row it covers, for O(nnz * b.ncols())
    /// work in total.
    fn solve<X, B>(&self, x: &mut X, b: &B) -> Result<(), SolveError>
    where
        X: DenseMatrix<T>,
        B: DenseMatrix<T>,
    {
        let A = &self.inner;
        _check_solve_dims(A, x, b);
        A.check_full_diagonal(b.nrows())?;

        let Some(diag) = A.data.get(&0) else {
            return Ok(());
        };

        // band 1 first, so the far bands come last when reversed below
        let mut cursors: Vec<_> = A
            .data
            .range(1..)
            .map(|(&band, entries)| (band, entries.iter().rev().peekable()))
            .collect();

        let mut sums = vec![T::zero(); b.ncols()];

        for (&row, &d) in diag.iter().rev() {
            for (k, s) in sums.iter_mut().enumerate() {
                *s = b.get(row, k);
            }

            for (band, cursor) in cursors.iter_mut().rev() {
                // on a super-diagonal band the position is the row
                if let Some(&(&pos, &v)) = cursor.peek() {
                    if pos == row {
                        let col = BandedMatrix::<T>::col_of(*band, pos);
                        for (k, s) in sums.iter_mut().enumerate() {
                            *s -= v * x.get(col, k);
                        }
                        cursor.next();
                    }
                }
            }

            for (k, &s) in sums.iter().enumerate() {
                x[(row, k)] = s / d;
            }
        }
        Ok(())
    }
}

impl<T: FloatT> LinearSolve<T> for LowerTriangularMatrix<T> {
    /// Forward substitution.
    ///
    /// Rows are resolved from the first to the last, with one forward
    /// cursor per sub-diagonal band, starting from the band nearest the
    /// diagonal.
    fn solve<X, B>(&self, x: &mut X, b: &B) -> Result<(), SolveError>
    where
        X: DenseMatrix<T>,
        B: DenseMatrix<T>,
    {
        let A = &self.inner;
        _check_solve_dims(A, x, b);
        A.check_full_diagonal(b.nrows())?;

        let Some(diag) = A.data.get(&0) else {
            return Ok(());
        };

        let mut cursors: Vec<_> = A
            .data
            .range(..0)
            .map(|(&band, entries)| (band, entries.iter().peekable()))
            .collect();

        let mut sums = vec![T::zero(); b.ncols()];

        for (&row, &d) in diag.iter() {
            for (k, s) in sums.iter_mut().enumerate() {
                *s = b.get(row, k);
            }

            for (band, cursor) in cursors.iter_mut().rev() {
                // on a sub-diagonal band the position is the column
                if let Some(&(&pos, &v)) = cursor.peek() {
                    if BandedMatrix::<T>::row_of(*band, pos) == row {
                        for (k, s) in sums.iter_mut().enumerate() {
                            *s -= v * x.get(pos, k);
                        }
                        cursor.next();
                    }
                }
            }

            for (k, &s) in sums.iter().enumerate() {
                x[(row, k)] = s / d;
            }
        }
        Ok(())
    }
}

impl<T: FloatT> From<&SparseMatrix<T>> for UpperTriangularMatrix<T> {
    fn from(A: &SparseMatrix<T>) -> Self {
        let (m, n) = A.size();
        Self {
            inner: project(BandStructure::Triu, m, n, A.iter()),
        }
    }
}

impl<T: FloatT> From<&BandedMatrix<T>> for UpperTriangularMatrix<T> {
    fn from(A: &BandedMatrix<T>) -> Self {
        let (m, n) = A.size();
        Self {
            inner: project(BandStructure::Triu, m, n, band_entries(A, 0, isize::MAX)),
        }
    }
}

impl<T: FloatT> From<&SparseMatrix<T>> for LowerTriangularMatrix<T> {
    fn from(A: &SparseMatrix<T>) -> Self {
        let (m, n) = A.size();
        Self {
            inner: project(BandStructure::Tril, m, n, A.iter()),
        }
    }
}

impl<T: FloatT> From<&BandedMatrix<T>> for LowerTriangularMatrix<T> {
    fn from(A: &BandedMatrix<T>) -> Self {
        let (m, n) = A.size();
        Self {
            inner: project(BandStructure::Tril, m, n, band_entries(A, isize::MIN, 0)),
        }
    }
}
