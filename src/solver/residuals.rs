#![allow(non_snake_case)]

use crate::algebra::*;
use thiserror::Error;

/// Default per-component bound on `|rhs - A·x|`
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Error type returned by [`verify`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerificationError {
    #[error("solution check failed at index {index}: deviation {deviation:e} exceeds tolerance {tolerance:e}")]
    ToleranceExceeded {
        index: usize,
        deviation: f64,
        tolerance: f64,
    },
    #[error(transparent)]
    Dimension(#[from] CooError),
}

/// Infinity norm of the residual `A·x - b`, computed over CSC data.
///
/// # Panics
/// Panics if `x` or `b` do not match the dimensions of `A`.
pub fn residual_norm<T: FloatT>(A: &CscMatrix<T>, x: &[T], b: &[T]) -> T {
    // r = A*x - b
    let mut r = b.to_vec();
    A.gemv(&mut r, x, T::one(), -T::one());
    r.norm_inf()
}

/// Check a solution against the original triplets.
///
/// `A·x` is recomputed from the triplets of `A` and compared with `rhs`
/// componentwise.  Returns the largest deviation on success, or the first
/// index whose deviation exceeds `tolerance`.
pub fn verify<T: FloatT>(
    A: &CooMatrix<T>,
    x: &[T],
    rhs: &[T],
    tolerance: T,
) -> Result<T, VerificationError> {
    let mut Ax = vec![T::zero(); rhs.len()];
    A.mat_vec_mul(&mut Ax, T::one(), x)?;

    let mut maxdev = T::zero();
    for (index, (&bi, &axi)) in rhs.iter().zip(Ax.iter()).enumerate() {
        let deviation = (bi - axi).abs();
        if deviation.is_nan() || deviation > tolerance {
            return Err(VerificationError::ToleranceExceeded {
                index,
                deviation: deviation.to_f64().unwrap_or(f64::NAN),
                tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
            });
        }
        maxdev = T::max(maxdev, deviation);
    }
    Ok(maxdev)
}
