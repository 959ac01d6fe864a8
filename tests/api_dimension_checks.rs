#![allow(non_snake_case)]

use bandsparse::algebra::*;

// a collection of tests to ensure that operands of
// incompatible dimension are rejected

#[test]
fn api_dim_check_working() {
    let A = SparseMatrix::<f64>::new(4, 3);
    let x = Matrix::<f64>::zeros((3, 2));
    let y = A.mul_dense(&x);
    assert_eq!(y.size(), (4, 2));

    let At = A.transposed();
    let z = At.mul_dense(&y);
    assert_eq!(z.size(), (3, 2));
}

#[test]
#[should_panic]
fn api_dim_check_bad_dense_rows() {
    let A = SparseMatrix::<f64>::new(4, 3);
    let x = Matrix::<f64>::zeros((4, 2));
    let _ = A.mul_dense(&x);
}

#[test]
#[should_panic]
fn api_dim_check_bad_transposed_rows() {
    let A = SparseMatrix::<f64>::new(4, 3).transposed();
    let x = Matrix::<f64>::zeros((3, 2));
    let _ = A.mul_dense(&x);
}

#[test]
#[should_panic]
fn api_dim_check_bad_vector() {
    let A = SparseMatrix::<f64>::new(4, 3);
    let _ = A.mul_vec(&[1., 2.]);
}

#[test]
#[should_panic]
fn api_dim_check_bad_sparse_sum() {
    let A = SparseMatrix::<f64>::new(4, 3);
    let B = SparseMatrix::<f64>::new(3, 4);
    let _ = &A - &B;
}

#[test]
#[should_panic]
fn api_dim_check_bad_inner_product() {
    let A = SparseMatrix::<f64>::new(4, 3);
    let _ = SparseMatrix::inner_product(&A, &A.transposed());
}

#[test]
#[should_panic]
fn api_dim_check_bad_banded_product() {
    let A = BandedMatrix::<f64>::new(4, 3);
    let B = BandedMatrix::<f64>::new(4, 3);
    let _ = A.mul_banded(&B);
}

#[test]
#[should_panic]
fn api_dim_check_bad_banded_dense() {
    let A = BandedMatrix::<f64>::new(4, 3).transposed();
    let x = Matrix::<f64>::zeros((3, 1));
    let _ = A.mul_dense(&x);
}

#[test]
#[should_panic]
fn api_dim_check_bad_solution_rows() {
    let mut L = LowerTriangularMatrix::<f64>::new(3, 3);
    L.add_diagonal(1.);
    let b = Matrix::<f64>::zeros((3, 1));
    let mut x = Matrix::<f64>::zeros((2, 1));
    let _ = L.solve(&mut x, &b);
}

#[test]
#[should_panic]
fn api_dim_check_bad_solution_cols() {
    let mut U = UpperTriangularMatrix::<f64>::new(3, 3);
    U.add_diagonal(1.);
    let b = Matrix::<f64>::zeros((3, 2));
    let mut x = Matrix::<f64>::zeros((3, 1));
    let _ = U.solve(&mut x, &b);
}

#[test]
#[should_panic]
fn api_dim_check_bad_delete_row() {
    let mut A = BandedMatrix::<f64>::new(4, 3).transposed();
    A.delete_row(3);
}
