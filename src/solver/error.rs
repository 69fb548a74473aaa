use crate::algebra::{ConversionError, CooError};
use crate::io::MatrixMarketError;
use crate::solver::engine::EngineError;
use crate::solver::residuals::VerificationError;
use crate::solver::settings::SettingsError;
use thiserror::Error;

/// Error type returned by [`MatrixMarketSolver`](crate::solver::MatrixMarketSolver).
///
/// Wraps the error of whichever stage failed.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error(transparent)]
    MatrixMarket(#[from] MatrixMarketError),
    #[error(transparent)]
    Storage(#[from] CooError),
    #[error("cannot convert COO to CSC: {0}")]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("cannot write solver output: {0}")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    /// true if the solve completed but the solution failed verification
    pub fn is_tolerance_failure(&self) -> bool {
        matches!(
            self,
            SolverError::Verification(VerificationError::ToleranceExceeded { .. })
        )
    }
}
