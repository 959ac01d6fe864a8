#![allow(non_snake_case)]

use bandsparse::{algebra::*, settings::*};

// tridiagonal matrix with 4 on the diagonal and -1 off it
fn tridiagonal(n: usize) -> SparseMatrix<f64> {
    let mut A = SparseMatrix::new(n, n);
    for i in 0..n {
        A.set(i, i, 4.);
        if i + 1 < n {
            A.set(i, i + 1, -1.);
            A.set(i + 1, i, -1.);
        }
    }
    A
}

fn assert_close(a: &Matrix<f64>, b: &Matrix<f64>) {
    assert_eq!(a.size(), b.size());
    for (x, y) in a.data.iter().zip(b.data.iter()) {
        assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
    }
}

#[test]
fn test_factored_solve() {
    // M = L * D^-1 * U built from the triangles of A, solved with one
    // forward sweep, a diagonal scaling and one backward sweep
    let n = 50;
    let A = tridiagonal(n);
    let L = LowerTriangularMatrix::from(&A);
    let U = UpperTriangularMatrix::from(&A);
    let D = DiagonalMatrix::from(&A);
    let mut Dinv = D.clone();
    Dinv.invert().unwrap();

    let data: Vec<f64> = (0..2 * n).map(|i| (i % 7) as f64 - 3.).collect();
    let xtrue = Matrix::new_from_slice((n, 2), &data);
    let b = L.mul_dense(&Dinv.mul_dense(&U.mul_dense(&xtrue)));

    let mut y = Matrix::<f64>::zeros((n, 2));
    L.solve(&mut y, &b).unwrap();

    // D^-1 applied through a solve, then undone
    let mut z = Matrix::<f64>::zeros((n, 2));
    D.solve(&mut z, &y).unwrap();
    assert_close(&z, &Dinv.mul_dense(&y));

    let w = D.mul_dense(&y);
    let mut x = Matrix::<f64>::zeros((n, 2));
    U.solve(&mut x, &w).unwrap();
    assert_close(&x, &xtrue);
}

#[test]
fn test_banded_projection_solve() {
    // the same factors taken from band storage
    let n = 20;
    let mut B = BandedMatrix::<f64>::new(n, n);
    B.add_diagonal(3.);
    for i in 0..n - 2 {
        B.set(i, i + 2, 1.);
        B.set(i + 2, i, -1.);
    }

    let xtrue = Matrix::new_from_slice((n, 1), &vec![1.; n]);

    let U = UpperTriangularMatrix::from(&B);
    assert_eq!(U.num_bands(), 2);
    let mut x = Matrix::<f64>::zeros((n, 1));
    U.solve(&mut x, &U.mul_dense(&xtrue)).unwrap();
    assert_close(&x, &xtrue);

    // transposing B swaps the roles of its triangles
    let L = LowerTriangularMatrix::from(&B.transposed());
    assert_eq!(L.get(2, 0), 1.);
    let mut x = Matrix::<f64>::zeros((n, 1));
    L.solve(&mut x, &L.mul_dense(&xtrue)).unwrap();
    assert_close(&x, &xtrue);
}

#[test]
fn test_rank_deficient_reports() {
    let settings = SparseSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();

    let mut A = tridiagonal(4);
    A.set(2, 2, 0.);
    let U = UpperTriangularMatrix::from(&A);

    let b = Matrix::from(&[[1.], [1.], [1.], [1.]]);
    let mut x = Matrix::<f64>::zeros((4, 1));
    let err = U.solve_with(&mut x, &b, &settings).unwrap_err();

    assert_eq!(
        err,
        SolveError::RankDeficient {
            expected: 4,
            found: 3
        }
    );
    assert_eq!(
        err.to_string(),
        "Matrix is rank-deficient: 3 of 4 diagonal entries are nonzero"
    );
    assert_eq!(x, Matrix::<f64>::zeros((4, 1)));
}
