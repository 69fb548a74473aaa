#![allow(non_snake_case)]

use super::{EngineError, FactorPhase, LinearSolverEngine, LuStrategy};
use crate::algebra::*;
use faer::linalg::solvers::Solve;
use faer::sparse::linalg::solvers::{Lu, SymbolicLu};
use faer::sparse::linalg::LuError;
use faer::sparse::{FaerError, SparseColMatRef, SymbolicSparseColMatRef};

/// engine ran out of memory
pub const FAER_STATUS_OUT_OF_MEMORY: i32 = -1;
/// matrix dimensions overflow the engine's index type
pub const FAER_STATUS_INDEX_OVERFLOW: i32 = -2;
/// matrix is structurally singular
pub const FAER_STATUS_SINGULAR: i32 = -3;
/// solve produced NaN or infinite values
pub const FAER_STATUS_NONFINITE: i32 = -4;
/// operands have incompatible dimensions or a malformed CSC structure
pub const FAER_STATUS_DIMENSION_MISMATCH: i32 = -5;

/// Sparse LU engine backed by `faer`.
///
/// faer always computes a COLAMD column ordering, so both
/// [`LuStrategy`] values produce the same factorization.
#[derive(Debug, Default, Clone, Copy)]
pub struct FaerLuEngine;

impl FaerLuEngine {
    pub fn new() -> Self {
        Self
    }
}

/// Symbolic LU factors computed by [`FaerLuEngine`]
pub struct FaerSymbolic {
    n: usize,
    strategy: LuStrategy,
    symbolic: SymbolicLu<usize>,
}

impl FaerSymbolic {
    /// the strategy requested when the factors were computed
    pub fn strategy(&self) -> LuStrategy {
        self.strategy
    }
}

/// Numeric LU factors computed by [`FaerLuEngine`]
pub struct FaerNumeric {
    n: usize,
    lu: Lu<usize, f64>,
}

impl std::fmt::Debug for FaerSymbolic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaerSymbolic")
            .field("n", &self.n)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for FaerNumeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaerNumeric")
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}

impl LinearSolverEngine<f64> for FaerLuEngine {
    type Symbolic = FaerSymbolic;
    type Numeric = FaerNumeric;

    fn name(&self) -> &'static str {
        "faer"
    }

    // the COLAMD ordering is computed for every strategy
    fn applies_strategy(&self, strategy: LuStrategy) -> bool {
        strategy == LuStrategy::Auto
    }

    fn symbolic(&self, A: &CscMatrix<f64>, strategy: LuStrategy) -> Result<FaerSymbolic, EngineError> {
        let fail = |status| EngineError::Factorization {
            phase: FactorPhase::Symbolic,
            status,
        };

        check_structure(A).map_err(fail)?;

        let symbA = SymbolicSparseColMatRef::new_checked(A.m, A.n, &A.colptr, None, &A.rowval);
        let symbolic = SymbolicLu::try_new(symbA).map_err(|e| fail(faer_status(e)))?;

        Ok(FaerSymbolic {
            n: A.n,
            strategy,
            symbolic,
        })
    }

    fn numeric(&self, symbolic: &FaerSymbolic, A: &CscMatrix<f64>) -> Result<FaerNumeric, EngineError> {
        let fail = |status| EngineError::Factorization {
            phase: FactorPhase::Numeric,
            status,
        };

        check_structure(A).map_err(fail)?;
        if A.n != symbolic.n {
            return Err(fail(FAER_STATUS_DIMENSION_MISMATCH));
        }

        let symbA = SymbolicSparseColMatRef::new_checked(A.m, A.n, &A.colptr, None, &A.rowval);
        let matA = SparseColMatRef::new(symbA, A.nzval.as_slice());

        let lu = Lu::try_new_with_symbolic(symbolic.symbolic.clone(), matA)
            .map_err(|e| fail(lu_status(e)))?;

        Ok(FaerNumeric { n: A.n, lu })
    }

    fn solve(&self, numeric: &FaerNumeric, x: &mut [f64], b: &[f64]) -> Result<(), EngineError> {
        let n = numeric.n;
        if x.len() != n || b.len() != n {
            return Err(EngineError::Solve {
                status: FAER_STATUS_DIMENSION_MISMATCH,
            });
        }
        if n == 0 {
            return Ok(());
        }

        let rhs = faer::Mat::<f64>::from_fn(n, 1, |i, _| b[i]);
        let sol = numeric.lu.solve(rhs);

        for (i, xi) in x.iter_mut().enumerate() {
            *xi = sol[(i, 0)];
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::Solve {
                status: FAER_STATUS_NONFINITE,
            });
        }
        Ok(())
    }
}

// faer panics on malformed input, so the CSC invariants
// are checked before any structure is handed over
fn check_structure(A: &CscMatrix<f64>) -> Result<(), i32> {
    if !A.is_square() || A.check_format().is_err() {
        return Err(FAER_STATUS_DIMENSION_MISMATCH);
    }
    Ok(())
}

#[allow(unreachable_patterns)]
fn lu_status(e: LuError) -> i32 {
    match e {
        LuError::SymbolicSingular { .. } => FAER_STATUS_SINGULAR,
        LuError::Generic(e) => faer_status(e),
        _ => FAER_STATUS_OUT_OF_MEMORY,
    }
}

fn faer_status(e: FaerError) -> i32 {
    match e {
        FaerError::IndexOverflow => FAER_STATUS_INDEX_OVERFLOW,
        _ => FAER_STATUS_OUT_OF_MEMORY,
    }
}
