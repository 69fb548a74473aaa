#![allow(non_snake_case)]

use crate::algebra::*;

impl<T> CooMatrix<T>
where
    T: FloatT,
{
    /// Sparse matrix-vector product `v = alpha * A * u`.
    ///
    /// `v` is overwritten.  When the matrix uses
    /// [`TripletStorage::Triangle`] every off-diagonal triplet `(i,j)`
    /// also contributes as `(j,i)`, so that one stored triangle behaves
    /// as the full symmetric matrix.
    ///
    /// Fails unless both `v` and `u` have length `m`.
    pub fn mat_vec_mul(&self, v: &mut [T], alpha: T, u: &[T]) -> Result<(), CooError> {
        let m = self.dim();
        if v.len() != m || u.len() != m {
            return Err(CooError::IncompatibleDimension {
                dim: m,
                v: v.len(),
                u: u.len(),
            });
        }

        v.set(T::zero());

        let mirror = self.storage == TripletStorage::Triangle;

        for (i, j, aij) in self.triplets() {
            v[i] += alpha * aij * u[j];
            if mirror && i != j {
                v[j] += alpha * aij * u[i];
            }
        }
        Ok(())
    }
}

#[test]
fn test_coo_mat_vec_mul() {
    let mut A = CooMatrix::<f64>::new(2, 4);
    A.put(0, 0, 2.0).unwrap();
    A.put(0, 1, 3.0).unwrap();
    A.put(1, 0, 3.0).unwrap();
    A.put(1, 1, 5.0).unwrap();

    // stale contents of v must not leak into the result
    let mut v = vec![100.0, -100.0];
    A.mat_vec_mul(&mut v, 1.0, &[1.0, 1.0]).unwrap();
    assert_eq!(v, vec![5.0, 8.0]);

    A.mat_vec_mul(&mut v, -2.0, &[1.0, 0.0]).unwrap();
    assert_eq!(v, vec![-4.0, -6.0]);
}

#[test]
fn test_coo_mat_vec_mul_triangle() {
    let mut A = CooMatrix::<f64>::new(2, 1);
    A.storage = TripletStorage::Triangle;
    A.put(0, 1, 3.0).unwrap();

    let mut v = vec![0.0; 2];
    A.mat_vec_mul(&mut v, 1.0, &[1.0, 2.0]).unwrap();
    assert_eq!(v, vec![6.0, 3.0]);
}

#[test]
fn test_coo_mat_vec_mul_triangle_diagonal() {
    // diagonal entries are never mirrored
    let mut A = CooMatrix::<f64>::new(2, 3);
    A.storage = TripletStorage::Triangle;
    A.put(0, 0, 4.0).unwrap();
    A.put(1, 0, 1.0).unwrap();
    A.put(1, 1, 3.0).unwrap();

    let mut v = vec![0.0; 2];
    A.mat_vec_mul(&mut v, 1.0, &[1.0, 2.0]).unwrap();
    assert_eq!(v, vec![6.0, 7.0]);
}

#[test]
fn test_coo_mat_vec_mul_bad_dims() {
    let A = CooMatrix::<f64>::new(3, 0);
    let mut v = vec![0.0; 3];
    assert_eq!(
        A.mat_vec_mul(&mut v, 1.0, &[1.0, 1.0]),
        Err(CooError::IncompatibleDimension { dim: 3, v: 3, u: 2 })
    );
    let mut v = vec![0.0; 4];
    assert!(A.mat_vec_mul(&mut v, 1.0, &[1.0; 3]).is_err());
}
