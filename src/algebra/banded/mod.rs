#![allow(non_snake_case)]

// The diagonal and triangular types wrap a BandedMatrix whose
// BandStructure tag restricts the admissible bands.  They expose the
// core read-only through Deref and re-implement only the mutators whose
// preconditions differ.

use crate::algebra::{BandStructure, FloatT};

mod core;
pub use self::core::*;
mod matrix_math;

// Serialized form of the wrappers.  Deserialization goes through this
// and the checked `TryFrom` generated below.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "T: FloatT + serde::Deserialize<'de>"))]
pub(crate) struct WrappedBands<T> {
    inner: BandedMatrix<T>,
}

macro_rules! impl_band_wrapper {
    ($name:ident, $structure:expr) => {
        impl<T: FloatT> std::ops::Deref for $name<T> {
            type Target = BandedMatrix<T>;
            fn deref(&self) -> &BandedMatrix<T> {
                &self.inner
            }
        }

        impl<T: FloatT> $name<T> {
            /// Adds `c` to every entry of the main diagonal
            pub fn add_diagonal(&mut self, c: T) {
                self.inner.add_diagonal(c);
            }

            /// Scales the stored entries of the main diagonal by `c`
            pub fn scale_diagonal(&mut self, c: T) {
                self.inner.scale_diagonal(c);
            }

            /// Unwraps the underlying band storage as a general banded
            /// matrix, so the result transposes and accepts any band.
            pub fn into_banded(self) -> BandedMatrix<T> {
                self.inner.into_general()
            }

            /// Returns an unchanged copy.  The band pattern is fixed, so
            /// there is no in-place transpose.
            pub fn transposed(&self) -> Self {
                self.clone()
            }
        }

        #[cfg(feature = "serde")]
        impl<T: FloatT> TryFrom<super::WrappedBands<T>> for $name<T> {
            type Error = crate::algebra::SparseFormatError;

            fn try_from(parts: super::WrappedBands<T>) -> Result<Self, Self::Error> {
                let inner = parts.inner;
                if inner.structure != $structure
                    || inner.shape != crate::algebra::MatrixShape::N
                {
                    return Err(crate::algebra::SparseFormatError::BadStructure);
                }
                Ok(Self { inner })
            }
        }

        impl<T: FloatT> crate::algebra::ShapedMatrix for $name<T> {
            fn nrows(&self) -> usize {
                self.inner.m
            }
            fn ncols(&self) -> usize {
                self.inner.n
            }
            fn shape(&self) -> crate::algebra::MatrixShape {
                self.inner.shape
            }
        }

        impl<T: FloatT> crate::algebra::MatrixMath<T> for $name<T> {
            fn scale(&mut self, c: T) {
                crate::algebra::MatrixMath::scale(&mut self.inner, c);
            }
            fn negate(&mut self) {
                crate::algebra::MatrixMath::negate(&mut self.inner);
            }
            fn norm2(&self) -> T {
                crate::algebra::MatrixMath::norm2(&self.inner)
            }
        }

        impl<T: FloatT> crate::io::MatrixMarketWrite<T> for $name<T> {
            fn mm_size(&self) -> (usize, usize) {
                crate::io::MatrixMarketWrite::mm_size(&self.inner)
            }
            fn mm_nnz(&self) -> usize {
                self.inner.nnz()
            }
            fn mm_entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
                crate::io::MatrixMarketWrite::mm_entries(&self.inner)
            }
        }

        impl<T: FloatT> std::fmt::Display for $name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.inner, f)
            }
        }
    };
}

mod diagonal;
pub use diagonal::*;
mod triangular;
pub use triangular::*;

// Square `min(m,n)` matrix holding the entries that lie inside it and on
// a band admitted by `structure`.
pub(crate) fn project<T, I>(structure: BandStructure, m: usize, n: usize, entries: I) -> BandedMatrix<T>
where
    T: FloatT,
    I: Iterator<Item = (usize, usize, T)>,
{
    let k = m.min(n);
    let mut out = BandedMatrix::with_structure(k, k, structure);
    for (i, j, v) in entries {
        if i < k && j < k && structure.admits(BandedMatrix::<T>::band(i, j)) {
            out.set(i, j, v);
        }
    }
    out
}

// logical (row, col, value) triples of the bands lower..=upper of A
pub(crate) fn band_entries<T: FloatT>(
    A: &BandedMatrix<T>,
    lower: isize,
    upper: isize,
) -> impl Iterator<Item = (usize, usize, T)> {
    A.bands(lower, upper).into_iter().flat_map(|(b, band)| {
        band.into_iter().map(move |(d, v)| {
            (
                BandedMatrix::<T>::row_of(b, d),
                BandedMatrix::<T>::col_of(b, d),
                v,
            )
        })
    })
}
