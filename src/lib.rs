//! __mmsolve__ reads square sparse matrices in Matrix Market coordinate
//! format, converts them to compressed sparse column (CSC) form, solves
//!
//! $$ A x = b, \quad b = [1, \ldots, 1]^\top $$
//!
//! with an external direct sparse LU engine and verifies the solution.
//!
//! The crate is arranged in stages:
//!
//! * [`io`] : a line-bounded reader for the `coordinate real general` and
//!   `coordinate real symmetric` Matrix Market formats, producing a
//!   [`CooMatrix`](algebra::CooMatrix).
//!
//! * [`algebra`] : triplet and CSC matrix types, the COO to CSC
//!   conversion and matrix-vector products.
//!
//! * [`solver`] : the [`LinearSolverEngine`](solver::LinearSolverEngine)
//!   interface to sparse LU engines, residual checks and the
//!   [`MatrixMarketSolver`](solver::MatrixMarketSolver) that runs every
//!   stage in sequence.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "faer-sparse")]
//! # {
//! use mmsolve::solver::*;
//!
//! let settings = SolveSettingsBuilder::<f64>::default()
//!     .verbose(true)
//!     .build()
//!     .unwrap();
//!
//! let mut solver = MatrixMarketSolver::new(FaerLuEngine::new(), settings).unwrap();
//! let report = solver.solve_file("bfwb62.mtx").unwrap();
//! println!("residual = {:e}", report.residual_norm);
//! # }
//! ```
//!
//! # Features
//!
//! * `faer-sparse` (default) : the [`FaerLuEngine`](solver::FaerLuEngine)
//!   sparse LU engine and the `mmsolve` binary.
//! * `serde` (default) : JSON serialization of settings, reports and
//!   matrices.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod io;
pub mod solver;
pub mod timers;
