#![allow(non_snake_case)]

use bandsparse::{algebra::*, io::*};
use std::io::{Read, Seek};

fn test_sparse() -> SparseMatrix<f64> {
    SparseMatrix::from_triplets(3, 2, &[(0, 1, 1.5), (2, 0, -2.), (2, 1, 4.)])
}

fn read_back(file: &mut std::fs::File) -> String {
    file.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file.read_to_string(&mut result).unwrap();
    result
}

#[test]
fn test_save_sparse() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();

    test_sparse().save_to_file(file.path()).unwrap();

    assert_eq!(
        read_back(&mut file2),
        "%%MatrixMarket matrix coordinate real general\n\
         3 2 3\n\
         1 2 1.5\n\
         3 1 -2\n\
         3 2 4\n"
    );
}

#[test]
fn test_save_sparse_transposed() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();

    // storage order, logical indices
    test_sparse().transposed().save_to_file(file.path()).unwrap();

    assert_eq!(
        read_back(&mut file2),
        "%%MatrixMarket matrix coordinate real general\n\
         2 3 3\n\
         2 1 1.5\n\
         1 3 -2\n\
         2 3 4\n"
    );
}

#[test]
fn test_save_banded() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();

    let mut U = UpperTriangularMatrix::<f64>::new(3, 3);
    U.set(0, 0, 1.);
    U.set(1, 1, 2.);
    U.set(0, 2, 3.);
    U.save_to_file(file.path()).unwrap();

    // one entry per line, band by band
    let contents = read_back(&mut file2);
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], MATRIX_MARKET_HEADER);
    assert_eq!(lines[1..], ["3 3 3", "1 1 1", "2 2 2", "1 3 3"]);
}

#[test]
fn test_save_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("A.mtx");
    assert!(test_sparse().save_to_file(path).is_err());
}

#[test]
fn test_print_banded_to_buffer() {
    let mut A = BandedMatrix::<f64>::new(2, 2);
    A.set(1, 0, 0.25);

    let mut buffer: Vec<u8> = Vec::new();
    A.print_to(&mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "[1,0] 0.2500\n\n");
}

#[test]
fn test_print_banded_to_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();

    let mut D = DiagonalMatrix::<f64>::new(2, 2);
    D.set_diag(1, 3.);
    D.print_to(&mut file.into_file()).unwrap();

    assert_eq!(read_back(&mut file2), "[1,1] 3.0000\n\n");
}
