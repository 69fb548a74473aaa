//! Interface to external sparse LU engines.
//!
//! An engine factors a square [`CscMatrix`] in two phases and then solves
//! against the numeric factors.  Factor handles are ordinary owned values,
//! so an engine's resources are released when its handles are dropped.

use crate::algebra::*;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

cfg_if::cfg_if! {
    if #[cfg(feature = "faer-sparse")] {
        mod faer_lu;
        pub use faer_lu::*;
    }
}

/// Column ordering strategy requested from the symbolic phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LuStrategy {
    /// let the engine choose
    #[default]
    Auto,
    /// treat the matrix as unsymmetric regardless of its pattern
    Unsymmetric,
}

impl fmt::Display for LuStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuStrategy::Auto => write!(f, "auto"),
            LuStrategy::Unsymmetric => write!(f, "unsymmetric"),
        }
    }
}

/// Factorization phase at which an engine failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorPhase {
    Symbolic,
    Numeric,
}

impl fmt::Display for FactorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorPhase::Symbolic => write!(f, "symbolic"),
            FactorPhase::Numeric => write!(f, "numeric"),
        }
    }
}

/// Error type returned by [`LinearSolverEngine`] operations.
///
/// Each variant carries the engine's negative status code.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("{phase} factorization failed with status {status}")]
    Factorization { phase: FactorPhase, status: i32 },
    #[error("solve failed with status {status}")]
    Solve { status: i32 },
}

impl EngineError {
    /// engine status code of the failure
    pub fn status(&self) -> i32 {
        match self {
            EngineError::Factorization { status, .. } => *status,
            EngineError::Solve { status } => *status,
        }
    }
}

/// Three phase direct solver interface: symbolic factorization,
/// numeric factorization and solve.
pub trait LinearSolverEngine<T: FloatT> {
    /// result of the symbolic (ordering / pattern) phase
    type Symbolic;
    /// numeric factors of a matrix
    type Numeric;

    /// a short name used in progress output
    fn name(&self) -> &'static str;

    /// true if `strategy` changes how the engine factors a matrix.
    /// Strategies that are accepted but ignored return false.
    fn applies_strategy(&self, _strategy: LuStrategy) -> bool {
        true
    }

    fn symbolic(&self, A: &CscMatrix<T>, strategy: LuStrategy)
        -> Result<Self::Symbolic, EngineError>;

    fn numeric(
        &self,
        symbolic: &Self::Symbolic,
        A: &CscMatrix<T>,
    ) -> Result<Self::Numeric, EngineError>;

    /// solve `A x = b` using factors from [`numeric`](Self::numeric)
    fn solve(&self, numeric: &Self::Numeric, x: &mut [T], b: &[T]) -> Result<(), EngineError>;
}
