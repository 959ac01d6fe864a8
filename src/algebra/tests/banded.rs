#![allow(non_snake_case)]
use super::*;
use crate::io::MatrixMarketWrite;
use rand::SeedableRng;

fn test_banded_4x4() -> BandedMatrix<f64> {
    // A =
    //[ 2.0  1.0   ⋅    ⋅ ]
    //[  ⋅   2.0  1.0   ⋅ ]
    //[-1.0   ⋅   2.0  1.0]
    //[  ⋅  -1.0   ⋅   2.0]
    let mut A = BandedMatrix::new(4, 4);
    A.add_diagonal(2.);
    for i in 0..3 {
        A.set(i, i + 1, 1.);
    }
    for i in 0..2 {
        A.set(i + 2, i, -1.);
    }
    A
}

fn random_banded(rng: &mut StdRng, m: usize, n: usize, nnz: usize) -> BandedMatrix<f64> {
    let mut A = BandedMatrix::new(m, n);
    for _ in 0..nnz {
        let i = rng.gen_range(0..m);
        let j = rng.gen_range(0..n);
        A.set(i, j, rng.gen_range(-1.0..1.0));
    }
    A
}

#[test]
fn test_band_index_roundtrip() {
    for &(m, n) in &[(5, 7), (7, 5), (1, 4), (6, 6)] {
        for i in 0..m {
            for j in 0..n {
                let b = BandedMatrix::<f64>::band(i, j);
                let d = BandedMatrix::<f64>::band_index(i, j);
                assert_eq!(BandedMatrix::<f64>::row_of(b, d), i);
                assert_eq!(BandedMatrix::<f64>::col_of(b, d), j);
            }
        }
    }
    assert_eq!(BandedMatrix::<f64>::band(3, 1), -2);
    assert_eq!(BandedMatrix::<f64>::band_index(3, 1), 1);
}

#[test]
fn test_set_get() {
    let mut A = BandedMatrix::<f64>::new(3, 5);

    A.set(0, 4, 1.5);
    A.set(2, 0, -3.);
    assert_eq!(A.get(0, 4), 1.5);
    assert_eq!(A.get(2, 0), -3.);
    assert_eq!(A.get(1, 1), 0.);
    assert_eq!(A.num_bands(), 2);
    assert_eq!(A.bands(4, 4)[&4][&0], 1.5);
    assert_eq!(A.bands(-2, -2)[&-2][&0], -3.);

    A.set(0, 4, 0.);
    assert_eq!(A.get(0, 4), 0.);
    assert_eq!(A.num_bands(), 1);
    assert_eq!(A.nnz(), 1);

    A.delete(2, 0);
    assert_eq!(A.nnz(), 0);
    assert!(A.data.is_empty());
}

#[test]
fn test_entry_mut_fills_in() {
    let mut A = BandedMatrix::<f64>::new(3, 3);
    let _ = *A.entry_mut(1, 2);
    assert_eq!(A.nnz(), 1);
    *A.entry_mut(1, 2) -= 2.;
    assert_eq!(A.get(1, 2), -2.);
}

#[test]
#[should_panic]
fn test_set_out_of_bounds() {
    let mut A = BandedMatrix::<f64>::new(3, 5);
    A.set(3, 0, 1.);
}

#[test]
fn test_transpose() {
    let mut rng = StdRng::seed_from_u64(5);
    let A = random_banded(&mut rng, 4, 6, 15);
    let At = A.transposed();

    assert_eq!(At.size(), (6, 4));
    for (i, j, v) in A.iter() {
        assert_eq!(At.get(j, i), v);
    }
    assert_eq!(At.transposed(), A);

    // stored keys are reinterpreted, not rewritten
    assert_eq!(At.data, A.data);
}

#[test]
fn test_bands_transposed() {
    let A = test_banded_4x4();
    let At = A.transposed();

    let upper = A.bands(1, 3);
    assert_eq!(upper.keys().copied().collect::<Vec<_>>(), vec![1]);

    // the sub-diagonal of A is the super-diagonal of its transpose
    let upper_t = At.bands(1, 3);
    assert_eq!(upper_t.keys().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(upper_t[&2].len(), 2);

    let all_t = At.bands(-10, 10);
    assert_eq!(all_t.keys().copied().collect::<Vec<_>>(), vec![-1, 0, 2]);

    assert!(A.bands(2, 1).is_empty());
}

#[test]
fn test_delete_row_col() {
    let mut A = test_banded_4x4();
    A.delete_row(2);
    assert_eq!(A.nnz(), 6);
    assert_eq!(A.get(2, 0), 0.);
    assert_eq!(A.get(2, 3), 0.);

    A.delete_col(1);
    assert_eq!(A.nnz(), 3);
    assert!(A.data.values().all(|b| !b.is_empty()));

    let mut At = test_banded_4x4().transposed();
    At.delete_row(0); // column 0 of A
    assert_eq!(At.nnz(), 7);
    assert_eq!(At.get(0, 2), 0.);
}

#[test]
fn test_diagonal_ops() {
    let mut A = BandedMatrix::<f64>::new(3, 5);

    // nothing stored yet
    A.scale_diagonal(4.);
    assert_eq!(A.nnz(), 0);

    A.add_diagonal(1.5);
    assert_eq!(A.nnz(), 3);
    assert_eq!(A.get(2, 2), 1.5);

    A.scale_diagonal(2.);
    assert_eq!(A.get(1, 1), 3.);

    A.add_diagonal(-3.);
    assert_eq!(A.nnz(), 0);
    assert_eq!(A.num_bands(), 0);
}

#[test]
fn test_add_sub() {
    let A = test_banded_4x4();
    let At = A.transposed();

    // destination is transposed, rhs is not
    let S = &At + &A;
    assert!(S.is_transposed());
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(S.get(i, j), A.get(i, j) + A.get(j, i));
        }
    }

    let D = &A - &At;
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(D.get(i, j), A.get(i, j) - A.get(j, i));
        }
    }
    // skew part has an empty diagonal
    assert!(D.bands(0, 0).is_empty());

    let Z = &S - &S;
    assert_eq!(Z.nnz(), 0);
}

#[test]
#[should_panic]
fn test_add_dimension_mismatch() {
    let A = BandedMatrix::<f64>::new(2, 3);
    let _ = &A + &A.transposed();
}

#[test]
fn test_scale_norm() {
    let A = test_banded_4x4();
    assert!((A.norm2() - 21f64.sqrt()).abs() < 1e-12);

    let B = &A * -1.;
    assert_eq!(B.get(2, 0), 1.);

    let mut C = A.clone();
    C.scale(0.);
    assert_eq!(C.nnz(), 0);
}

#[test]
fn test_mul_dense() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..4 {
        let A = random_banded(&mut rng, 6, 5, 14);
        let x = random_dense(&mut rng, 5, 3);
        let reference = dense_mul(&to_dense((6, 5), A.iter()), &x);
        assert_close(&A.mul_dense(&x), &reference, 1e-12);

        let At = A.transposed();
        let y = random_dense(&mut rng, 6, 2);
        let reference = dense_mul(&to_dense((5, 6), At.iter()), &y);
        assert_close(&At.mul_dense(&y), &reference, 1e-12);
    }
}

#[test]
fn test_mul_banded() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..4 {
        let A = random_banded(&mut rng, 4, 6, 10);
        let B = random_banded(&mut rng, 6, 3, 8);
        let Bt = random_banded(&mut rng, 3, 6, 8).transposed();

        for B in [B, Bt] {
            let C = A.mul_banded(&B);
            assert_eq!(C.size(), (4, 3));

            let reference = dense_mul(&to_dense((4, 6), A.iter()), &to_dense((6, 3), B.iter()));
            assert_close(&to_dense((4, 3), C.iter()), &reference, 1e-12);
            assert!(C.iter().all(|(_, _, v)| v != 0.));
        }
    }
}

#[test]
fn test_structure_gates_access() {
    let mut A = BandedMatrix::<f64>::with_structure(3, 3, BandStructure::Triu);
    A.set(0, 2, 1.);
    assert_eq!(A.get(2, 0), 0.);
    assert_eq!(A.structure(), BandStructure::Triu);

    // transposing an upper pattern gives a lower one
    A.transpose();
    assert!(A.is_transposed());
    assert_eq!(A.structure(), BandStructure::Tril);
    assert_eq!(A.get(2, 0), 1.);
    assert_eq!(A.get(0, 2), 0.);
    A.set(1, 0, 3.);
    assert_eq!(A.transposed().get(0, 1), 3.);
}

#[test]
fn test_unwrapped_bands_are_general() {
    // U = [1 5]
    //     [0 1]
    let mut U = UpperTriangularMatrix::<f64>::new(2, 2);
    U.add_diagonal(1.);
    U.set(0, 1, 5.);

    let sum = &*U + &*U;
    let scaled = &*U * 2.;
    let product = U.mul_banded(&U);
    let mut B = U.into_banded();

    for A in [&B, &sum, &scaled, &product] {
        assert_eq!(A.structure(), BandStructure::General);
        assert_eq!(A.transposed().get(1, 0), A.get(0, 1));
        assert_eq!(A.transposed().transposed(), *A);
    }
    assert_eq!(sum.transposed().get(1, 0), 10.);

    B.transpose();
    assert_eq!(B.get(1, 0), 5.);
    B.set(0, 1, 3.);
    assert_eq!(B.nnz(), 4);

    let mut sum = sum;
    sum.set(1, 0, 3.);
    assert_eq!(sum.get(1, 0), 3.);
}

#[test]
#[should_panic]
fn test_structure_rejects_set() {
    let mut A = BandedMatrix::<f64>::with_structure(3, 3, BandStructure::Diagonal);
    A.set(1, 0, 1.);
}

#[test]
fn test_display_and_matrix_market() {
    let mut A = BandedMatrix::<f64>::new(2, 3);
    A.set(0, 2, 0.5);
    A.set(1, 0, 2.);
    A.set(1, 1, -1.);

    assert_eq!(
        A.to_string(),
        "[1,0] 2.0000\n\n[1,1] -1.0000\n\n[0,2] 0.5000\n\n"
    );

    let mut out: Vec<u8> = Vec::new();
    A.transposed().write_matrix_market(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "%%MatrixMarket matrix coordinate real general\n\
         3 2 3\n\
         1 2 2\n\
         2 2 -1\n\
         3 1 0.5\n"
    );
}
