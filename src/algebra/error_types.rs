use std::fmt;
use thiserror::Error;

/// Matrix axis named in index errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Error type returned by [`CooMatrix`](crate::algebra::CooMatrix) assembly
/// and multiplication.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CooError {
    /// A row or column index lies outside `[0, m)`
    #[error("{axis} index {index} is outside the range [0, {dim})")]
    IndexOutOfRange { axis: Axis, index: i64, dim: usize },
    /// The triplet storage is full
    #[error("maximum number of entries ({capacity}) has been exceeded")]
    CapacityExceeded { capacity: usize },
    /// Vector lengths do not match the matrix dimension
    #[error("vector lengths (v: {v}, u: {u}) must equal the matrix dimension {dim}")]
    IncompatibleDimension { dim: usize, v: usize, u: usize },
    /// Row, column and value arrays have different lengths
    #[error("triplet arrays have different lengths (rowval: {rowval}, colval: {colval}, nzval: {nzval})")]
    MismatchedTriplets {
        rowval: usize,
        colval: usize,
        nzval: usize,
    },
    /// Storage for the requested number of entries cannot be allocated
    #[error("cannot allocate storage for {len} entries")]
    AllocationFailed { len: usize },
}

/// Error type returned by the COO to CSC conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// CSC storage does not match the shape of the triplet matrix
    #[error("a {dim} x {dim} matrix with {nnz} triplets does not fit CSC storage of {m} x {n} with {capacity} entries")]
    IncompatibleShape {
        dim: usize,
        nnz: usize,
        m: usize,
        n: usize,
        capacity: usize,
    },
    /// CSC arrays cannot be allocated
    #[error("cannot allocate CSC arrays for {len} entries")]
    AllocationFailed { len: usize },
}

/// Error type returned by [`CscMatrix::check_format`](crate::algebra::CscMatrix::check_format).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Data is not sorted by row index within each column
    #[error("Data is not sorted by row index within each column")]
    BadRowOrdering,
    /// Row value exceeds the matrix row dimension
    #[error("Row value exceeds the matrix row dimension")]
    BadRowval,
    /// Matrix column pointer values are defective
    #[error("Bad column pointer values")]
    BadColptr,
}
