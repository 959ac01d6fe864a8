#![allow(non_snake_case)]

use crate::algebra::*;

/// Compressed sparse row export of a [`SparseMatrix`].
///
/// `rowptr` has length `rows + 1`.  Entries of row `i` occupy positions
/// `rowptr[i] - b .. rowptr[i+1] - b` of `colind` and `values`, where `b`
/// is the index base, which is also added to every column index.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrParts<T> {
    pub rowptr: Vec<usize>,
    pub colind: Vec<usize>,
    pub values: Vec<T>,
    pub base: IndexBase,
}

/// Coordinate (triplet) export of a [`SparseMatrix`], in storage order.
#[derive(Debug, Clone, PartialEq)]
pub struct CooParts<T> {
    pub rowind: Vec<usize>,
    pub colind: Vec<usize>,
    pub values: Vec<T>,
    pub base: IndexBase,
}

impl<T> SparseMatrix<T>
where
    T: FloatT,
{
    /// Exports the logical matrix in compressed sparse row format.
    pub fn to_csr(&self, base: IndexBase) -> CsrParts<T> {
        let b = base.offset();

        // logical row-major order.  A transposed matrix stores
        // columns, so its triples need sorting first.
        let mut triplets: Vec<(usize, usize, T)> = self.iter().collect();
        if self.is_transposed() {
            triplets.sort_by_key(|&(i, j, _)| (i, j));
        }

        let mut rowptr = vec![0; self.m + 1];
        for &(i, _, _) in &triplets {
            rowptr[i + 1] += 1;
        }
        let mut acc = b;
        for p in rowptr.iter_mut() {
            acc += *p;
            *p = acc;
        }

        let (colind, values): (Vec<usize>, Vec<T>) = triplets.iter().map(|&(_, j, v)| (j + b, v)).unzip();

        CsrParts {
            rowptr,
            colind,
            values,
            base,
        }
    }

    /// Exports the stored entries as logical `(row, col, value)` triples,
    /// in storage order.
    pub fn to_coo(&self, base: IndexBase) -> CooParts<T> {
        let b = base.offset();
        let nnz = self.nnz();
        let mut parts = CooParts {
            rowind: Vec::with_capacity(nnz),
            colind: Vec::with_capacity(nnz),
            values: Vec::with_capacity(nnz),
            base,
        };
        for (i, j, v) in self.iter() {
            parts.rowind.push(i + b);
            parts.colind.push(j + b);
            parts.values.push(v);
        }
        parts
    }

    /// Rebuilds an `m x n` matrix from a CSR export.  Zero values are
    /// dropped.
    pub fn from_csr(m: usize, n: usize, parts: &CsrParts<T>) -> Result<Self, SparseFormatError> {
        let b = parts.base.offset();
        let CsrParts {
            rowptr,
            colind,
            values,
            ..
        } = parts;

        if rowptr.len() != m + 1 || colind.len() != values.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        if rowptr[0] != b || rowptr.windows(2).any(|p| p[0] > p[1]) {
            return Err(SparseFormatError::BadRowptr);
        }
        if rowptr[m] - b != colind.len() {
            return Err(SparseFormatError::BadRowptr);
        }

        let mut A = Self::new(m, n);
        for i in 0..m {
            let rng = (rowptr[i] - b)..(rowptr[i + 1] - b);
            for (&j, &v) in colind[rng.clone()].iter().zip(&values[rng]) {
                let j = _unbase(j, b, n)?;
                A.set(i, j, v);
            }
        }
        Ok(A)
    }

    /// Rebuilds an `m x n` matrix from a COO export.  Zero values are
    /// dropped and later duplicates overwrite earlier ones.
    pub fn from_coo(m: usize, n: usize, parts: &CooParts<T>) -> Result<Self, SparseFormatError> {
        let b = parts.base.offset();
        if parts.rowind.len() != parts.values.len() || parts.colind.len() != parts.values.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        let mut A = Self::new(m, n);
        for ((&i, &j), &v) in parts.rowind.iter().zip(&parts.colind).zip(&parts.values) {
            let i = _unbase(i, b, m)?;
            let j = _unbase(j, b, n)?;
            A.set(i, j, v);
        }
        Ok(A)
    }
}

// strip the index base and bounds check against dim
fn _unbase(idx: usize, base: usize, dim: usize) -> Result<usize, SparseFormatError> {
    let idx = idx
        .checked_sub(base)
        .ok_or(SparseFormatError::BadIndexBase)?;
    if idx < dim {
        Ok(idx)
    } else {
        Err(SparseFormatError::BadIndex)
    }
}
