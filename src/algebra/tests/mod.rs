#![allow(non_snake_case)]

use crate::algebra::*;
use rand::rngs::StdRng;
use rand::Rng;

mod banded;

// shared helpers for the matrix tests

pub(crate) fn random_sparse(rng: &mut StdRng, m: usize, n: usize, nnz: usize) -> SparseMatrix<f64> {
    let mut A = SparseMatrix::new(m, n);
    A.rand_with(rng, nnz);
    A
}

pub(crate) fn random_dense(rng: &mut StdRng, m: usize, n: usize) -> Matrix<f64> {
    let data = (0..m * n).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f64>>();
    Matrix::new_from_slice((m, n), &data)
}

pub(crate) fn to_dense<I>(size: (usize, usize), entries: I) -> Matrix<f64>
where
    I: Iterator<Item = (usize, usize, f64)>,
{
    let mut D = Matrix::zeros(size);
    for (i, j, v) in entries {
        D[(i, j)] = v;
    }
    D
}

pub(crate) fn dense_mul(A: &Matrix<f64>, B: &Matrix<f64>) -> Matrix<f64> {
    assert_eq!(A.ncols(), B.nrows());
    let mut C = Matrix::zeros((A.nrows(), B.ncols()));
    for i in 0..A.nrows() {
        for j in 0..B.ncols() {
            for k in 0..A.ncols() {
                C[(i, j)] += A[(i, k)] * B[(k, j)];
            }
        }
    }
    C
}

pub(crate) fn assert_close(A: &Matrix<f64>, B: &Matrix<f64>, tol: f64) {
    assert_eq!(A.size(), B.size());
    for (a, b) in A.data.iter().zip(B.data.iter()) {
        assert!((a - b).abs() <= tol, "{} != {}", a, b);
    }
}
