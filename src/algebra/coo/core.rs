#![allow(non_snake_case)]

use crate::algebra::{try_with_capacity, Axis, CooError, FloatT};
use itertools::izip;
use std::collections::TryReserveError;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Symmetry declared by the source of a [`CooMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatrixSymmetry {
    /// all entries were supplied
    #[default]
    General,
    /// only the lower triangle was supplied
    Symmetric,
}

/// Which part of the matrix the triplets of a [`CooMatrix`] describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TripletStorage {
    /// every entry of the matrix is stored explicitly
    #[default]
    Full,
    /// one triangle is stored and products mirror each off-diagonal entry
    Triangle,
}

/// Square sparse matrix in coordinate (triplet) format with a fixed capacity
///
/// __Example usage__ : To construct the 2 x 2 matrix
/// ```text
/// A = [2.  3.]
///     [3.  5.]
/// ```
///
/// ```no_run
/// use mmsolve::algebra::CooMatrix;
///
/// let mut A : CooMatrix<f64> = CooMatrix::new(2, 4);
/// A.put(0, 0, 2.).unwrap();
/// A.put(0, 1, 3.).unwrap();
/// A.put(1, 0, 3.).unwrap();
/// A.put(1, 1, 5.).unwrap();
///
/// let mut v = vec![0.; 2];
/// A.mat_vec_mul(&mut v, 1., &[1., 1.]).unwrap();
/// assert_eq!(v, vec![5., 8.]);
/// ```
///
/// Storage is allocated once by [`new`](CooMatrix::new) or
/// [`try_new`](CooMatrix::try_new) and never grows.  Entries are appended
/// with [`put`](CooMatrix::put) until the capacity `nnz_max` is reached,
/// so every stored index lies in `[0, m)` and at most `nnz_max` triplets
/// are held.  Deserialization checks the same conditions.

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "CooMatrixData<T>",
        bound(serialize = "T: Serialize", deserialize = "T: FloatT + DeserializeOwned")
    )
)]
pub struct CooMatrix<T = f64> {
    // number of rows and columns
    m: usize,
    /// symmetry declared by the data source
    pub symmetry: MatrixSymmetry,
    /// stored part of the matrix
    pub storage: TripletStorage,
    // maximum number of triplets
    nnz_max: usize,
    // row, column and value arrays, each of length nnz
    rowval: Vec<usize>,
    colval: Vec<usize>,
    nzval: Vec<T>,
}

impl<T> CooMatrix<T>
where
    T: FloatT,
{
    /// Allocate an empty `m` x `m` matrix with room for `nnz_max` triplets.
    ///
    /// # Panics
    /// Panics if the storage cannot be allocated.  Use
    /// [`try_new`](CooMatrix::try_new) for sizes read from a file.
    pub fn new(m: usize, nnz_max: usize) -> Self {
        CooMatrix {
            m,
            symmetry: MatrixSymmetry::General,
            storage: TripletStorage::Full,
            nnz_max,
            rowval: Vec::with_capacity(nnz_max),
            colval: Vec::with_capacity(nnz_max),
            nzval: Vec::with_capacity(nnz_max),
        }
    }

    /// Allocate an empty `m` x `m` matrix with room for `nnz_max`
    /// triplets, failing with [`CooError::AllocationFailed`] if the
    /// storage cannot be reserved.
    pub fn try_new(m: usize, nnz_max: usize) -> Result<Self, CooError> {
        let alloc_err = |_: TryReserveError| CooError::AllocationFailed { len: nnz_max };
        Ok(CooMatrix {
            m,
            symmetry: MatrixSymmetry::General,
            storage: TripletStorage::Full,
            nnz_max,
            rowval: try_with_capacity(nnz_max).map_err(alloc_err)?,
            colval: try_with_capacity(nnz_max).map_err(alloc_err)?,
            nzval: try_with_capacity(nnz_max).map_err(alloc_err)?,
        })
    }

    /// Append the triplet `(i, j, aij)`.
    ///
    /// Fails if either index is outside `[0, m)` or if the matrix already
    /// holds `nnz_max` entries.  Never reallocates.
    pub fn put(&mut self, i: usize, j: usize, aij: T) -> Result<(), CooError> {
        if i >= self.m {
            return Err(self.out_of_range(Axis::Row, i));
        }
        if j >= self.m {
            return Err(self.out_of_range(Axis::Column, j));
        }
        if self.nnz() >= self.nnz_max {
            return Err(CooError::CapacityExceeded {
                capacity: self.nnz_max,
            });
        }
        self.rowval.push(i);
        self.colval.push(j);
        self.nzval.push(aij);
        Ok(())
    }

    fn out_of_range(&self, axis: Axis, index: usize) -> CooError {
        CooError::IndexOutOfRange {
            axis,
            index: i64::try_from(index).unwrap_or(i64::MAX),
            dim: self.m,
        }
    }

    /// number of rows and columns
    pub fn dim(&self) -> usize {
        self.m
    }

    /// number of stored triplets
    pub fn nnz(&self) -> usize {
        self.nzval.len()
    }

    /// maximum number of triplets (`nnz_max`)
    pub fn capacity(&self) -> usize {
        self.nnz_max
    }

    /// true if no triplets have been stored
    pub fn is_empty(&self) -> bool {
        self.nzval.is_empty()
    }

    /// row indices of the stored triplets
    pub fn rowval(&self) -> &[usize] {
        &self.rowval
    }

    /// column indices of the stored triplets
    pub fn colval(&self) -> &[usize] {
        &self.colval
    }

    /// values of the stored triplets
    pub fn nzval(&self) -> &[T] {
        &self.nzval
    }

    /// iterator over the stored `(row, col, value)` triplets in insertion order
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        izip!(self.rowval(), self.colval(), self.nzval()).map(|(&i, &j, &v)| (i, j, v))
    }
}

// clones keep the full capacity so that `put` never reallocates
impl<T: Clone> Clone for CooMatrix<T> {
    fn clone(&self) -> Self {
        let with_room = |v: &Vec<usize>| {
            let mut out = Vec::with_capacity(self.nnz_max);
            out.extend_from_slice(v);
            out
        };
        let mut nzval = Vec::with_capacity(self.nnz_max);
        nzval.extend_from_slice(&self.nzval);
        CooMatrix {
            m: self.m,
            symmetry: self.symmetry,
            storage: self.storage,
            nnz_max: self.nnz_max,
            rowval: with_room(&self.rowval),
            colval: with_room(&self.colval),
            nzval,
        }
    }
}

// serialized form of a CooMatrix, validated by replaying every
// triplet through `put`
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct CooMatrixData<T> {
    m: usize,
    symmetry: MatrixSymmetry,
    storage: TripletStorage,
    nnz_max: usize,
    rowval: Vec<usize>,
    colval: Vec<usize>,
    nzval: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: FloatT> TryFrom<CooMatrixData<T>> for CooMatrix<T> {
    type Error = CooError;

    fn try_from(data: CooMatrixData<T>) -> Result<Self, CooError> {
        let (nrow, ncol, nval) = (data.rowval.len(), data.colval.len(), data.nzval.len());
        if nrow != ncol || nrow != nval {
            return Err(CooError::MismatchedTriplets {
                rowval: nrow,
                colval: ncol,
                nzval: nval,
            });
        }

        let mut coo = CooMatrix::try_new(data.m, data.nnz_max)?;
        coo.symmetry = data.symmetry;
        coo.storage = data.storage;
        for (i, j, aij) in izip!(data.rowval, data.colval, data.nzval) {
            coo.put(i, j, aij)?;
        }
        Ok(coo)
    }
}

#[test]
fn test_coo_put_capacity() {
    let mut A = CooMatrix::<f64>::new(3, 2);
    assert!(A.is_empty());
    assert!(A.put(0, 1, 1.0).is_ok());
    assert!(A.put(2, 2, 2.0).is_ok());
    assert_eq!(
        A.put(1, 1, 3.0),
        Err(CooError::CapacityExceeded { capacity: 2 })
    );

    // failed insertions leave the matrix untouched
    assert_eq!(A.nnz(), 2);
    assert_eq!(A.rowval(), &[0, 2]);
    assert_eq!(A.colval(), &[1, 2]);
    assert_eq!(A.nzval(), &[1.0, 2.0]);
}

#[test]
fn test_coo_put_range() {
    let mut A = CooMatrix::<f64>::new(2, 4);
    assert_eq!(
        A.put(2, 0, 1.0),
        Err(CooError::IndexOutOfRange {
            axis: Axis::Row,
            index: 2,
            dim: 2
        })
    );
    assert_eq!(
        A.put(0, 5, 1.0),
        Err(CooError::IndexOutOfRange {
            axis: Axis::Column,
            index: 5,
            dim: 2
        })
    );
    assert!(A.is_empty());
}

#[test]
fn test_coo_zero_capacity() {
    let mut A = CooMatrix::<f64>::new(0, 0);
    assert_eq!(A.capacity(), 0);
    assert!(A.put(0, 0, 1.0).is_err());
    assert_eq!(A.triplets().count(), 0);
}

#[test]
fn test_coo_try_new() {
    let A = CooMatrix::<f64>::try_new(4, 3).unwrap();
    assert_eq!(A.dim(), 4);
    assert_eq!(A.capacity(), 3);
    assert!(A.is_empty());

    assert_eq!(
        CooMatrix::<f64>::try_new(1, usize::MAX / 2).unwrap_err(),
        CooError::AllocationFailed {
            len: usize::MAX / 2
        }
    );
}

#[test]
fn test_coo_clone_keeps_capacity() {
    let mut A = CooMatrix::<f64>::new(2, 3);
    A.put(1, 0, 2.0).unwrap();

    let mut B = A.clone();
    assert_eq!(B, A);
    assert!(B.put(0, 0, 1.0).is_ok());
    assert!(B.put(1, 1, 1.0).is_ok());
    assert!(B.put(0, 1, 1.0).is_err());
    assert_eq!(A.nnz(), 1);
}
