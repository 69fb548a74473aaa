//---------------------------------------------------------
// COO triplets to compressed sparse column conversion.
//
// Two passes of a counting sort place every triplet in its
// column, then each column is sorted by row and duplicate
// (row, col) entries are summed.
//---------------------------------------------------------

#![allow(non_snake_case)]

use crate::algebra::{ConversionError, CooMatrix, CscMatrix, FloatT};
use std::cmp::Ordering;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Convert the stored triplets of a [`CooMatrix`] to CSC format.
    ///
    /// The result has strictly increasing row indices within each
    /// column, with duplicate `(row, col)` triplets summed into a single
    /// entry.  The output arrays depend only on the multiset of triplets,
    /// not on their insertion order.
    ///
    /// Triplets are converted as stored, so a matrix with
    /// [`TripletStorage::Triangle`](crate::algebra::TripletStorage::Triangle)
    /// produces its stored triangle only.
    pub fn from_coo(coo: &CooMatrix<T>) -> Result<Self, ConversionError> {
        let n = coo.dim();
        CscMatrix::try_spalloc(n, n, coo.nnz())?.assign_coo(coo)
    }

    /// Fill storage obtained from [`try_spalloc`](CscMatrix::try_spalloc)
    /// with the triplets of `coo`, as in [`from_coo`](CscMatrix::from_coo).
    ///
    /// The storage must be `dim` x `dim` with room for exactly
    /// `coo.nnz()` entries.
    pub fn assign_coo(mut self, coo: &CooMatrix<T>) -> Result<Self, ConversionError> {
        let n = coo.dim();
        if self.m != n || self.n != n || self.rowval.len() != coo.nnz() {
            return Err(ConversionError::IncompatibleShape {
                dim: n,
                nnz: coo.nnz(),
                m: self.m,
                n: self.n,
                capacity: self.rowval.len(),
            });
        }

        // scatter every triplet into its column.   The
        // column order within the result is still arbitrary
        self.colptr.fill(0);
        for &col in coo.colval() {
            self.colptr[col] += 1;
        }
        self.colcount_to_colptr();

        for (row, col, val) in coo.triplets() {
            let dest = self.colptr[col];
            self.rowval[dest] = row;
            self.nzval[dest] = val;
            self.colptr[col] += 1;
        }
        self.backshift_colptrs();

        Ok(self.sort_and_sum_columns())
    }

    // colptr holds per-column counts on entry and the
    // starting position of each column on exit
    fn colcount_to_colptr(&mut self) {
        let mut currentptr = 0;
        for p in &mut self.colptr {
            let count = *p;
            *p = currentptr;
            currentptr += count;
        }
    }

    // restore the column starts after colptr has been
    // advanced as a fill cursor
    fn backshift_colptrs(&mut self) {
        self.colptr.rotate_right(1);
        self.colptr[0] = 0;
    }

    // sort every column by row and merge duplicate rows.
    // Ties on the row are ordered by value so that summation
    // order does not depend on the triplet insertion order
    fn sort_and_sum_columns(self) -> Self {
        let (rowval, nzval) = (&self.rowval, &self.nzval);

        let mut perm = (0..self.nnz()).collect::<Vec<_>>();
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            perm[rng].sort_by(|&a, &b| {
                rowval[a]
                    .cmp(&rowval[b])
                    .then_with(|| _value_cmp(&nzval[a], &nzval[b]))
            });
        }

        let mut colptr = vec![0; self.n + 1];
        let mut rowout: Vec<usize> = Vec::with_capacity(self.nnz());
        let mut nzout: Vec<T> = Vec::with_capacity(self.nnz());

        for col in 0..self.n {
            let start = rowout.len();
            for &k in &perm[self.colptr[col]..self.colptr[col + 1]] {
                let (row, val) = (rowval[k], nzval[k]);
                match rowout.last() {
                    Some(&last) if rowout.len() > start && last == row => {
                        if let Some(acc) = nzout.last_mut() {
                            *acc += val;
                        }
                    }
                    _ => {
                        rowout.push(row);
                        nzout.push(val);
                    }
                }
            }
            colptr[col + 1] = rowout.len();
        }

        CscMatrix::new(self.m, self.n, colptr, rowout, nzout)
    }
}

// total order on values with NaN placed last
fn _value_cmp<T: FloatT>(a: &T, b: &T) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

#[test]
fn test_from_coo_basic() {
    // A = [4.  1.]
    //     [1.  3.]
    let mut coo = CooMatrix::<f64>::new(2, 4);
    coo.put(1, 1, 3.0).unwrap();
    coo.put(0, 1, 1.0).unwrap();
    coo.put(1, 0, 1.0).unwrap();
    coo.put(0, 0, 4.0).unwrap();

    let A = CscMatrix::from_coo(&coo).unwrap();
    assert!(A.check_format().is_ok());
    assert_eq!(A.colptr, vec![0, 2, 4]);
    assert_eq!(A.rowval, vec![0, 1, 0, 1]);
    assert_eq!(A.nzval, vec![4.0, 1.0, 1.0, 3.0]);
}

#[test]
fn test_from_coo_sums_duplicates() {
    let mut coo = CooMatrix::<f64>::new(3, 6);
    coo.put(2, 1, 1.0).unwrap();
    coo.put(0, 1, 5.0).unwrap();
    coo.put(2, 1, 2.0).unwrap();
    coo.put(1, 2, -1.0).unwrap();
    coo.put(2, 1, 0.5).unwrap();
    coo.put(1, 2, 1.0).unwrap();

    let A = CscMatrix::from_coo(&coo).unwrap();
    assert!(A.check_format().is_ok());
    assert_eq!(A.colptr, vec![0, 0, 2, 3]);
    assert_eq!(A.rowval, vec![0, 2, 1]);
    assert_eq!(A.nzval, vec![5.0, 3.5, 0.0]);
    assert!(A.nnz() <= coo.nnz());
}

#[test]
fn test_from_coo_empty() {
    let coo = CooMatrix::<f64>::new(3, 5);
    let A = CscMatrix::from_coo(&coo).unwrap();
    assert_eq!(A.colptr, vec![0, 0, 0, 0]);
    assert_eq!(A.nnz(), 0);

    let coo = CooMatrix::<f64>::new(0, 0);
    let A = CscMatrix::from_coo(&coo).unwrap();
    assert_eq!(A.colptr, vec![0]);
}

#[test]
fn test_assign_coo_shape() {
    let mut coo = CooMatrix::<f64>::new(2, 2);
    coo.put(1, 0, 2.0).unwrap();

    let A = CscMatrix::<f64>::try_spalloc(3, 3, 1).unwrap();
    assert_eq!(
        A.assign_coo(&coo),
        Err(ConversionError::IncompatibleShape {
            dim: 2,
            nnz: 1,
            m: 3,
            n: 3,
            capacity: 1
        })
    );

    let A = CscMatrix::<f64>::try_spalloc(2, 2, 1).unwrap();
    let A = A.assign_coo(&coo).unwrap();
    assert_eq!(A.colptr, vec![0, 1, 1]);
    assert_eq!(A.rowval, vec![1]);
}

#[test]
fn test_try_spalloc_failure() {
    let n = usize::MAX / 2;
    assert_eq!(
        CscMatrix::<f64>::try_spalloc(n, n, 0),
        Err(ConversionError::AllocationFailed { len: n + 1 })
    );
    assert_eq!(
        CscMatrix::<f64>::try_spalloc(0, usize::MAX, 0),
        Err(ConversionError::AllocationFailed { len: usize::MAX })
    );
}
