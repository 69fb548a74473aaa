#![allow(non_snake_case)]
#![cfg(feature = "faer-sparse")]

use mmsolve::{io::ConfigurablePrintTarget, solver::*};
use std::io::Write;

// tridiagonal [-1 2 -1] of order 6, lower triangle only
fn symmetric_tridiagonal() -> String {
    let n = 6;
    let mut text = String::from("%%MatrixMarket matrix coordinate real symmetric\n");
    text.push_str("% 1D Laplacian\n");
    text.push_str(&format!("{} {} {}\n", n, n, 2 * n - 1));
    for i in 1..=n {
        text.push_str(&format!("{} {} 2.0\n", i, i));
        if i < n {
            text.push_str(&format!("{} {} -1.0\n", i + 1, i));
        }
    }
    text
}

// A = [0 2 0]
//     [1 0 0]
//     [0 3 1]
// needs row pivoting, unsymmetric pattern
const UNSYMMETRIC_3X3: &str = "%%MatrixMarket matrix coordinate real general
3 3 4
2 1 1.0
1 2 2.0
3 2 3.0
3 3 1.0
";

#[test]
fn test_faer_solve_symmetric_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(symmetric_tridiagonal().as_bytes()).unwrap();
    file.flush().unwrap();

    let mut solver = MatrixMarketSolver::new(FaerLuEngine::new(), SolveSettings::<f64>::default()).unwrap();
    solver.print_to_buffer();
    let report = solver.solve_file(file.path()).unwrap();

    assert_eq!(report.m, 6);
    assert_eq!(report.nnz, 16);
    assert_eq!(report.nnz_csc, 16);
    assert!(report.residual_norm < 1e-12);

    // solution of the 1D Laplacian with unit load: x_i = i (n + 1 - i) / 2
    for (i, xi) in report.x.iter().enumerate() {
        let k = (i + 1) as f64;
        assert!((xi - k * (7. - k) / 2.).abs() < 1e-10);
    }

    let output = solver.get_print_buffer().unwrap();
    assert!(output.starts_with("... FILE: "));
}

#[test]
fn test_faer_solve_unsymmetric() {
    for strategy in [LuStrategy::Auto, LuStrategy::Unsymmetric] {
        let settings = SolveSettingsBuilder::<f64>::default()
            .strategy(strategy)
            .build()
            .unwrap();
        let mut solver = MatrixMarketSolver::new(FaerLuEngine::new(), settings).unwrap();
        solver.print_to_sink();
        let report = solver.solve_reader(UNSYMMETRIC_3X3.as_bytes()).unwrap();

        // x = [1, 0.5, -0.5]
        assert!((report.x[0] - 1.0).abs() < 1e-14);
        assert!((report.x[1] - 0.5).abs() < 1e-14);
        assert!((report.x[2] + 0.5).abs() < 1e-14);
    }
}

#[test]
fn test_faer_reports_ignored_strategy() {
    let settings = SolveSettingsBuilder::<f64>::default()
        .strategy(LuStrategy::Unsymmetric)
        .verbose(true)
        .build()
        .unwrap();
    let mut solver = MatrixMarketSolver::new(FaerLuEngine::new(), settings).unwrap();
    solver.print_to_buffer();
    solver.solve_reader(UNSYMMETRIC_3X3.as_bytes()).unwrap();

    let output = solver.get_print_buffer().unwrap();
    assert!(output.contains("note: the faer engine ignores strategy = unsymmetric"));
}

#[test]
fn test_faer_singular_matrix() {
    let text = "%%MatrixMarket matrix coordinate real general
2 2 2
1 1 1.0
2 1 1.0
";
    let mut solver = MatrixMarketSolver::new(FaerLuEngine::new(), SolveSettings::<f64>::default()).unwrap();
    solver.print_to_sink();
    let err = solver.solve_reader(text.as_bytes()).unwrap_err();
    match err {
        SolverError::Engine(e) => assert!(e.status() < 0),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_faer_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut solver = MatrixMarketSolver::new(FaerLuEngine::new(), SolveSettings::<f64>::default()).unwrap();
    solver.print_to_sink();
    let err = solver.solve_file(dir.path().join("bfwb62.mtx")).unwrap_err();
    assert!(matches!(err, SolverError::MatrixMarket(_)));
    assert!(!err.is_tolerance_failure());
}
