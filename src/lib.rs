//! __bandsparse__ is a sparse linear algebra engine with several
//! specialised storage layouts:
//!
//! * [`SparseMatrix`](algebra::SparseMatrix): general sparse storage as an
//!   ordered map of rows, with arithmetic, sparse x dense products,
//!   `AᵀA` squaring, CSR / COO export and random fill.
//!
//! * [`BandedMatrix`](algebra::BandedMatrix): storage keyed by band
//!   (`col - row`) and position within the band, with diagonal operations
//!   and products that exploit band locality.
//!
//! * [`DiagonalMatrix`](algebra::DiagonalMatrix),
//!   [`UpperTriangularMatrix`](algebra::UpperTriangularMatrix) and
//!   [`LowerTriangularMatrix`](algebra::LowerTriangularMatrix): banded
//!   matrices restricted to a band pattern, with direct solvers for
//!   dense right-hand sides via the [`LinearSolve`](algebra::LinearSolve)
//!   trait.
//!
//! Every matrix type transposes lazily, by flipping an orientation flag
//! rather than moving data, and never stores explicit zeros.
//!
//! Dense operands are anything implementing
//! [`DenseMatrix`](algebra::DenseMatrix); the column-major
//! [`Matrix`](algebra::Matrix) is provided.
//!
//! Sparse matrices of all kinds can be written in Matrix-Market coordinate
//! format through [`MatrixMarketWrite`](io::MatrixMarketWrite).
//!
//! # Features
//!
//! * `parallel` (default): row-parallel sparse x dense and sparse x
//!   vector products using rayon, tuned through
//!   [`SparseSettings`](settings::SparseSettings).
//!
//! * `serde` (default): serialization of matrices and settings, and
//!   JSON files through `io::JsonReadWrite`.  Deserialized matrices are
//!   checked against the same invariants the types maintain.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod io;
pub mod settings;
