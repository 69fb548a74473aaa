#![allow(non_snake_case)]

use mmsolve::{algebra::*, io::*};
use std::io::Write;

const SYMMETRIC_2X2: &str = "%%MatrixMarket matrix coordinate real symmetric
% lower triangle of [4 1; 1 3]
2 2 3
1 1 4.0
2 1 1.0
2 2 3.0
";

fn write_temp(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_file() {
    let file = write_temp(SYMMETRIC_2X2);
    let coo: CooMatrix<f64> =
        read_matrix_market_file(file.path(), &ReaderSettings::default()).unwrap();

    assert_eq!(coo.dim(), 2);
    assert_eq!(coo.nnz(), 4);
    assert_eq!(coo.capacity(), 6);
    assert_eq!(coo.symmetry, MatrixSymmetry::Symmetric);
    assert_eq!(coo.storage, TripletStorage::Full);
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result =
        read_matrix_market_file::<f64, _>(dir.path().join("missing.mtx"), &ReaderSettings::default());
    assert!(matches!(result, Err(MatrixMarketError::Io(_))));
}

#[test]
fn test_symmetric_diagonal_policies() {
    let single: CooMatrix<f64> =
        read_matrix_market(SYMMETRIC_2X2.as_bytes(), &ReaderSettings::default()).unwrap();
    let A = CscMatrix::from_coo(&single).unwrap();
    assert_eq!(A.colptr, vec![0, 2, 4]);
    assert_eq!(A.rowval, vec![0, 1, 0, 1]);
    assert_eq!(A.nzval, vec![4., 1., 1., 3.]);

    let settings = ReaderSettingsBuilder::default()
        .diagonal_policy(SymmetricDiagonal::Mirror)
        .build()
        .unwrap();
    let mirror: CooMatrix<f64> = read_matrix_market(SYMMETRIC_2X2.as_bytes(), &settings).unwrap();
    let A = CscMatrix::from_coo(&mirror).unwrap();
    assert_eq!(A.nnz(), 4);
    assert_eq!(A.get_entry((0, 0)), Some(8.));
    assert_eq!(A.get_entry((1, 1)), Some(6.));
    assert_eq!(A.get_entry((1, 0)), Some(1.));
    assert_eq!(A.get_entry((0, 1)), Some(1.));
}

#[test]
fn test_general_duplicates_summed() {
    let text = "%%MatrixMarket matrix coordinate real general
3 3 4
1 1 1.0
3 2 2.0
1 1 0.5
2 3 -1.0
";
    let coo: CooMatrix<f64> = read_matrix_market(text.as_bytes(), &ReaderSettings::default()).unwrap();
    assert_eq!(coo.nnz(), 4);

    let A = CscMatrix::from_coo(&coo).unwrap();
    assert!(A.check_format().is_ok());
    assert_eq!(A.nnz(), 3);
    assert_eq!(A.get_entry((0, 0)), Some(1.5));
    assert_eq!(A.get_entry((2, 1)), Some(2.));
    assert_eq!(A.get_entry((1, 2)), Some(-1.));
}

#[test]
fn test_format_errors_carry_line_numbers() {
    let cases: [(&str, usize); 5] = [
        ("%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1 1 1\n", 3),
        ("%%MatrixMarket matrix coordinate real general\n%\n%\n2 2\n", 4),
        ("%%MatrixMarket matrix coordinate real general\n3 2 1\n", 2),
        ("%%MatrixMarket matrix coordinate real\n", 1),
        ("%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 1\n0 2 1\n", 4),
    ];

    for (text, expected) in cases {
        let err = read_matrix_market::<f64, _>(text.as_bytes(), &ReaderSettings::default())
            .unwrap_err();
        let line = match err {
            MatrixMarketError::BadEntry { line }
            | MatrixMarketError::BadSize { line }
            | MatrixMarketError::NotSquare { line, .. }
            | MatrixMarketError::HeaderFieldCount { line, .. }
            | MatrixMarketError::Storage { line, .. } => line,
            other => panic!("unexpected error {other:?}"),
        };
        assert_eq!(line, expected, "input: {text:?}");
    }
}

#[test]
fn test_error_messages() {
    let text = "%%MatrixMarket matrix coordinate integer general\n1 1 1\n1 1 1\n";
    let err = read_matrix_market::<f64, _>(text.as_bytes(), &ReaderSettings::default())
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 1"));
    assert!(msg.contains("field"));
    assert!(msg.contains("integer"));

    let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 3 1.0\n";
    let err = read_matrix_market::<f64, _>(text.as_bytes(), &ReaderSettings::default())
        .unwrap_err();
    assert!(err.to_string().starts_with("line 3"));
}
