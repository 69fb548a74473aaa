#![allow(non_snake_case)]

use crate::algebra::{try_filled, ConversionError, FloatT, ShapedMatrix, SparseFormatError};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use mmsolve::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///
/// Matrices produced by [`CscMatrix::from_coo`] always pass
/// [`check_format`](CscMatrix::check_format).

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    ///

    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    ///
    /// To make an m x n matrix of zeros, use
    /// ```no_run
    /// use mmsolve::algebra::CscMatrix;
    /// let m = 3;
    /// let n = 4;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc(m,n,0);
    /// ```

    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Allocate space for a sparse matrix with `nnz` elements, failing
    /// with [`ConversionError::AllocationFailed`] if the arrays cannot
    /// be reserved.
    pub fn try_spalloc(m: usize, n: usize, nnz: usize) -> Result<Self, ConversionError> {
        let ncolptr = n
            .checked_add(1)
            .ok_or(ConversionError::AllocationFailed { len: n })?;
        let mut colptr =
            try_filled(ncolptr, 0).map_err(|_| ConversionError::AllocationFailed { len: ncolptr })?;
        let rowval = try_filled(nnz, 0).map_err(|_| ConversionError::AllocationFailed { len: nnz })?;
        let nzval =
            try_filled(nnz, T::zero()).map_err(|_| ConversionError::AllocationFailed { len: nnz })?;
        colptr[n] = nnz;

        Ok(CscMatrix::new(m, n, colptr, rowval, nzval))
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        let rows_in_this_column = &self.rowval[first..last];
        match rows_in_this_column.binary_search(&row) {
            Ok(idx) => Some(self.nzval[first + idx]),
            Err(_) => None,
        }
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

#[test]
fn test_csc_get_entry() {
    // A =
    //[ ⋅   4.0    ⋅    ⋅   12.0]
    //[1.0  5.0    ⋅    ⋅     ⋅ ]
    //[ ⋅   6.0    ⋅    ⋅   13.0]
    //[2.0  7.0  10.0   ⋅     ⋅ ]
    //[ ⋅   8.0  11.0   ⋅   14.0]
    //[3.0  9.0    ⋅    ⋅     ⋅ ]

    let A = CscMatrix::new(
        6,                                                                 // m
        5,                                                                 // n
        vec![0, 3, 9, 11, 11, 14],                                         // colptr
        vec![1, 3, 5, 0, 1, 2, 3, 4, 5, 3, 4, 0, 2, 4],                    // rowval
        vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14.], // nzval
    );

    assert!(A.check_format().is_ok());
    assert_eq!(A.nnz(), 14);

    assert_eq!(A.get_entry((1, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((5, 0)).unwrap(), 3.);
    assert_eq!(A.get_entry((3, 1)).unwrap(), 7.);
    assert_eq!(A.get_entry((4, 4)).unwrap(), 14.);

    assert!(A.get_entry((0, 0)).is_none());
    assert!(A.get_entry((2, 3)).is_none());
}

#[test]
fn test_csc_check_format() {
    // unsorted rows within a column
    let A = CscMatrix::new(2, 1, vec![0, 2], vec![1, 0], vec![1., 2.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowOrdering));

    // duplicate rows within a column
    let A = CscMatrix::new(2, 1, vec![0, 2], vec![1, 1], vec![1., 2.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowOrdering));

    // row out of bounds
    let A = CscMatrix::new(2, 1, vec![0, 1], vec![2], vec![1.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    // non-monotone colptr
    let A = CscMatrix {
        m: 2,
        n: 2,
        colptr: vec![0, 2, 1],
        rowval: vec![0],
        nzval: vec![1.0],
    };
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColptr));

    let A: CscMatrix<f64> = CscMatrix::spalloc(3, 3, 0);
    assert!(A.check_format().is_ok());
}
