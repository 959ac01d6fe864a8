//! Sparse, banded and dense matrix types.
//!
//! All matrix types are generic over [`FloatT`], which is implemented for
//! `f32` and `f64`.  General sparse matrices live in [`SparseMatrix`], band
//! storage in [`BandedMatrix`] and its solvable specialisations
//! [`DiagonalMatrix`], [`UpperTriangularMatrix`] and
//! [`LowerTriangularMatrix`].  [`Matrix`] is a minimal column-major dense
//! type implementing the [`DenseMatrix`] collaborator interface.

#![allow(non_snake_case)]

mod error_types;
mod floats;
mod matrix_traits;
mod matrix_types;
pub use error_types::*;
pub use floats::*;
pub use matrix_traits::*;
pub use matrix_types::*;

mod banded;
mod dense;
mod sparse;
pub use banded::*;
pub use dense::*;
pub use sparse::*;

#[cfg(test)]
mod tests;
