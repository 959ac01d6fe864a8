#![allow(non_snake_case)]

use crate::algebra::{AsFloatT, FloatT, MatrixShape, ShapedMatrix, SparseFormatError};
use crate::io::MatrixMarketWrite;
use rand::Rng;
use std::collections::BTreeMap;

/// Row storage of a [`SparseMatrix`]: column index -> value
pub type SparseRow<T> = BTreeMap<usize, T>;

/// General sparse matrix stored as an ordered map of rows, each row an
/// ordered map from column index to value.
///
/// Only nonzero values are stored.  Setting an entry to zero removes it,
/// and a row is removed once its last entry is gone.
///
/// Transposition is lazy: [`transpose`](SparseMatrix::transpose) swaps the
/// logical dimensions and flips an orientation flag, leaving the storage in
/// place.  All indices passed to or returned from the public interface are
/// in the logical (possibly transposed) frame.
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```
/// use bandsparse::algebra::*;
///
/// let mut A = SparseMatrix::<f64>::new(3, 3);
/// A.set(0, 0, 1.);
/// A.set(1, 0, 2.);
/// A.set(0, 1, 3.);
/// A.set(2, 1, 4.);
/// A.set(0, 2, 5.);
/// A.set(1, 2, 6.);
/// A.set(2, 2, 7.);
///
/// assert_eq!(A.nnz(), 7);
/// assert_eq!(A.get(1, 1), 0.);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "SparseParts<T>",
        bound(deserialize = "T: FloatT + serde::Deserialize<'de>")
    )
)]
pub struct SparseMatrix<T = f64> {
    /// number of (logical) rows
    pub(crate) m: usize,
    /// number of (logical) columns
    pub(crate) n: usize,
    /// storage orientation
    pub(crate) shape: MatrixShape,
    /// storage row -> (storage column -> value)
    pub(crate) data: BTreeMap<usize, SparseRow<T>>,
}

// unchecked serialized form, validated on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SparseParts<T> {
    m: usize,
    n: usize,
    shape: MatrixShape,
    data: BTreeMap<usize, SparseRow<T>>,
}

#[cfg(feature = "serde")]
impl<T: FloatT> TryFrom<SparseParts<T>> for SparseMatrix<T> {
    type Error = SparseFormatError;

    fn try_from(parts: SparseParts<T>) -> Result<Self, Self::Error> {
        let A = SparseMatrix {
            m: parts.m,
            n: parts.n,
            shape: parts.shape,
            data: parts.data,
        };
        A.check_format()?;
        Ok(A)
    }
}

impl<T> SparseMatrix<T>
where
    T: FloatT,
{
    /// An empty `m x n` matrix
    pub fn new(m: usize, n: usize) -> Self {
        Self {
            m,
            n,
            shape: MatrixShape::N,
            data: BTreeMap::new(),
        }
    }

    /// Builds an `m x n` matrix from `(row, col, value)` triples.  Later
    /// triples overwrite earlier ones at the same position.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn from_triplets(m: usize, n: usize, triplets: &[(usize, usize, T)]) -> Self {
        let mut A = Self::new(m, n);
        for &(i, j, v) in triplets {
            A.set(i, j, v);
        }
        A
    }

    /// True if the matrix is flagged as transposed relative to its storage
    pub fn is_transposed(&self) -> bool {
        self.shape == MatrixShape::T
    }

    // logical (i,j) -> storage (row, col)
    #[inline]
    pub(crate) fn storage_index(&self, i: usize, j: usize) -> (usize, usize) {
        match self.shape {
            MatrixShape::N => (i, j),
            MatrixShape::T => (j, i),
        }
    }

    #[inline]
    fn check_bounds(&self, i: usize, j: usize) {
        assert!(
            i < self.m && j < self.n,
            "index ({}, {}) out of bounds for {} x {} matrix",
            i,
            j,
            self.m,
            self.n
        );
    }

    /// Returns the value at `(i,j)`, or zero if nothing is stored there.
    /// Never creates an entry.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.check_bounds(i, j);
        let (r, c) = self.storage_index(i, j);
        self.data
            .get(&r)
            .and_then(|row| row.get(&c))
            .copied()
            .unwrap_or_else(T::zero)
    }

    /// Sets the value at `(i,j)`.  A zero value deletes the entry, and
    /// the row if it becomes empty.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        self.check_bounds(i, j);
        let (r, c) = self.storage_index(i, j);

        if v == T::zero() {
            if let Some(row) = self.data.get_mut(&r) {
                row.remove(&c);
                if row.is_empty() {
                    self.data.remove(&r);
                }
            }
        } else {
            self.data.entry(r).or_default().insert(c, v);
        }
    }

    /// Mutable access to the value at `(i,j)`.
    ///
    /// This causes fill-in: a zero entry is created if nothing is stored
    /// at `(i,j)`, and it stays stored even if left at zero.  Use
    /// [`get`](SparseMatrix::get) for reading.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut T {
        self.check_bounds(i, j);
        let (r, c) = self.storage_index(i, j);
        self.data
            .entry(r)
            .or_default()
            .entry(c)
            .or_insert_with(T::zero)
    }

    // adds v at (i,j), removing the entry if the sum cancels to zero
    pub(crate) fn accumulate(&mut self, i: usize, j: usize, v: T) {
        if v == T::zero() {
            return;
        }
        let (r, c) = self.storage_index(i, j);
        let row = self.data.entry(r).or_default();
        let entry = row.entry(c).or_insert_with(T::zero);
        *entry += v;
        if *entry == T::zero() {
            row.remove(&c);
            if row.is_empty() {
                self.data.remove(&r);
            }
        }
    }

    // drop explicit zeros (e.g. left behind by entry_mut or underflow)
    pub(crate) fn dropzeros(&mut self) {
        for row in self.data.values_mut() {
            row.retain(|_, v| *v != T::zero());
        }
        self.data.retain(|_, row| !row.is_empty());
    }

    /// Transposes the matrix in place without moving any data
    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.m, &mut self.n);
        self.shape = self.shape.flip();
    }

    /// Returns a transposed copy, leaving `self` untouched
    pub fn transposed(&self) -> Self {
        let mut out = self.clone();
        out.transpose();
        out
    }

    /// Checks the storage invariants: every stored index lies inside the
    /// matrix, and no zero value or empty row is stored.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        let (rows, cols) = match self.shape {
            MatrixShape::N => (self.m, self.n),
            MatrixShape::T => (self.n, self.m),
        };
        for (&r, row) in self.data.iter() {
            if row.is_empty() {
                return Err(SparseFormatError::StoredZero);
            }
            if r >= rows || row.keys().any(|&c| c >= cols) {
                return Err(SparseFormatError::BadIndex);
            }
            if row.values().any(|&v| v == T::zero()) {
                return Err(SparseFormatError::StoredZero);
            }
        }
        Ok(())
    }

    /// number of stored entries
    pub fn nnz(&self) -> usize {
        self.data.values().map(|row| row.len()).sum()
    }

    /// Iterates over the stored entries as logical `(row, col, value)`
    /// triples, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let shape = self.shape;
        self.data.iter().flat_map(move |(&r, row)| {
            row.iter().map(move |(&c, &v)| match shape {
                MatrixShape::N => (r, c, v),
                MatrixShape::T => (c, r, v),
            })
        })
    }

    /// Returns logical row `i` as a map from column index to value.
    ///
    /// For a transposed matrix there is no direct row index, and all
    /// stored rows are scanned.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    pub fn row(&self, i: usize) -> SparseRow<T> {
        assert!(i < self.m);
        match self.shape {
            MatrixShape::N => self.data.get(&i).cloned().unwrap_or_default(),
            MatrixShape::T => self
                .data
                .iter()
                .filter_map(|(&r, row)| row.get(&i).map(|&v| (r, v)))
                .collect(),
        }
    }

    /// Deletes every entry of logical row `i`
    pub fn delete_row(&mut self, i: usize) {
        assert!(i < self.m);
        match self.shape {
            MatrixShape::N => {
                self.data.remove(&i);
            }
            MatrixShape::T => self.delete_storage_column(i),
        }
    }

    /// Deletes every entry of logical column `j`
    pub fn delete_column(&mut self, j: usize) {
        assert!(j < self.n);
        match self.shape {
            MatrixShape::N => self.delete_storage_column(j),
            MatrixShape::T => {
                self.data.remove(&j);
            }
        }
    }

    fn delete_storage_column(&mut self, c: usize) {
        for row in self.data.values_mut() {
            row.remove(&c);
        }
        self.data.retain(|_, row| !row.is_empty());
    }

    /// True if the matrix is square and every stored off-diagonal entry
    /// is matched by an equal entry at the mirrored position
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        // checking every off-diagonal entry in both triangles also
        // catches entries whose mirror is not stored at all
        self.iter()
            .filter(|&(i, j, _)| i != j)
            .all(|(i, j, v)| self.get(j, i) == v)
    }

    /// Sets `nnz` uniformly chosen positions to uniform random values
    /// in `[0,1)`.  Fewer than `nnz` distinct entries result when
    /// positions collide.
    pub fn rand_with<R: Rng>(&mut self, rng: &mut R, nnz: usize) {
        if self.m == 0 || self.n == 0 {
            return;
        }
        for _ in 0..nnz {
            let i = rng.gen_range(0..self.m);
            let j = rng.gen_range(0..self.n);
            let v: T = rng.gen::<f64>().as_T();
            self.set(i, j, v);
        }
    }

    /// [`rand_with`](SparseMatrix::rand_with) using the thread-local generator
    pub fn rand(&mut self, nnz: usize) {
        self.rand_with(&mut rand::thread_rng(), nnz);
    }
}

impl<T> ShapedMatrix for SparseMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        self.shape
    }
}

impl<T> MatrixMarketWrite<T> for SparseMatrix<T>
where
    T: FloatT,
{
    fn mm_size(&self) -> (usize, usize) {
        self.size()
    }
    fn mm_nnz(&self) -> usize {
        self.nnz()
    }
    fn mm_entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new(self.iter())
    }
}

impl<T> std::fmt::Display for SparseMatrix<T>
where
    T: FloatT,
{
    // one "[i,j] value" line per entry, with a blank line after each stored row
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (&r, row) in self.data.iter() {
            for (&c, v) in row.iter() {
                let (i, j) = self.storage_index(r, c);
                writeln!(f, "[{},{}] {}", i, j, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
