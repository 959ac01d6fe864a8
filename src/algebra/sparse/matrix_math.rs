#![allow(non_snake_case)]

use crate::algebra::*;
use itertools::{EitherOrBoth, Itertools};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Sub};

impl<T: FloatT> MatrixMath<T> for SparseMatrix<T> {
    fn scale(&mut self, c: T) {
        if c == T::zero() {
            self.data.clear();
            return;
        }
        for row in self.data.values_mut() {
            row.values_mut().for_each(|v| *v *= c);
        }
        self.dropzeros();
    }

    fn negate(&mut self) {
        for row in self.data.values_mut() {
            row.values_mut().for_each(|v| *v = -*v);
        }
    }

    fn norm2(&self) -> T {
        self.data
            .values()
            .flat_map(|row| row.values())
            .fold(T::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }
}

impl<T: FloatT> Add<&SparseMatrix<T>> for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;

    /// # Panics
    /// Panics if the dimensions differ.
    fn add(self, rhs: &SparseMatrix<T>) -> SparseMatrix<T> {
        assert_eq!(self.size(), rhs.size());
        let mut out = self.clone();
        for (i, j, v) in rhs.iter() {
            out.accumulate(i, j, v);
        }
        out
    }
}

impl<T: FloatT> Sub<&SparseMatrix<T>> for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;

    /// # Panics
    /// Panics if the dimensions differ.
    fn sub(self, rhs: &SparseMatrix<T>) -> SparseMatrix<T> {
        assert_eq!(self.size(), rhs.size());
        let mut out = self.clone();
        for (i, j, v) in rhs.iter() {
            out.accumulate(i, j, -v);
        }
        out
    }
}

impl<T: FloatT> Mul<T> for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;

    fn mul(self, c: T) -> SparseMatrix<T> {
        let mut out = self.clone();
        out.scale(c);
        out
    }
}

// dot product of two sorted sparse rows, touching only the
// intersection of their index sets
pub(crate) fn sparse_dot<T: FloatT>(a: &SparseRow<T>, b: &SparseRow<T>) -> T {
    a.iter()
        .merge_join_by(b.iter(), |(ka, _), (kb, _)| ka.cmp(kb))
        .fold(T::zero(), |acc, pair| match pair {
            EitherOrBoth::Both((_, &x), (_, &y)) => acc + x * y,
            _ => acc,
        })
}

// true if the index ranges of two nonempty rows intersect
#[inline]
fn rows_overlap<T>(a: &SparseRow<T>, b: &SparseRow<T>) -> bool {
    match (
        a.first_key_value(),
        a.last_key_value(),
        b.first_key_value(),
        b.last_key_value(),
    ) {
        (Some((a0, _)), Some((a1, _)), Some((b0, _)), Some((b1, _))) => a1 >= b0 && b1 >= a0,
        _ => false,
    }
}

impl<T> SparseMatrix<T>
where
    T: FloatT,
{
    /// Standard inner product `Σ x_ij y_ij`.
    ///
    /// When both operands share a storage orientation the product is
    /// computed row by row over the intersection of the stored columns.
    ///
    /// # Panics
    /// Panics if the dimensions differ.
    pub fn inner_product(x: &Self, y: &Self) -> T {
        assert_eq!(x.size(), y.size());

        if x.shape == y.shape {
            x.data
                .iter()
                .filter_map(|(r, xrow)| y.data.get(r).map(|yrow| sparse_dot(xrow, yrow)))
                .fold(T::zero(), |acc, v| acc + v)
        } else {
            x.iter()
                .fold(T::zero(), |acc, (i, j, v)| acc + v * y.get(i, j))
        }
    }

    /// Computes the square `AᵀA` of a sparse matrix `A`.
    ///
    /// Each pair of columns of `A` is multiplied only if their row
    /// index ranges overlap, so provably disjoint pairs cost a constant
    /// time check.  Only the upper triangle is computed and then mirrored.
    pub fn square(A: &Self) -> Self {
        // logical columns of A, as maps row -> value.  For a transposed
        // matrix these are exactly the storage rows.
        let cols: Cow<BTreeMap<usize, SparseRow<T>>> = match A.shape {
            MatrixShape::T => Cow::Borrowed(&A.data),
            MatrixShape::N => {
                let mut cols: BTreeMap<usize, SparseRow<T>> = BTreeMap::new();
                for (i, j, v) in A.iter() {
                    cols.entry(j).or_default().insert(i, v);
                }
                Cow::Owned(cols)
            }
        };

        let mut out = Self::new(A.n, A.n);

        for (&i, ci) in cols.iter() {
            for (&j, cj) in cols.range(i..) {
                if !rows_overlap(ci, cj) {
                    continue;
                }
                let s = sparse_dot(ci, cj);
                if s != T::zero() {
                    out.set(i, j, s);
                    if i != j {
                        out.set(j, i, s);
                    }
                }
            }
        }
        out
    }
}
