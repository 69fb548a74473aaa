use crate::algebra::*;

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }
}

// sparse matrix-vector multiply, no transpose
#[allow(non_snake_case)]
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    if b == T::zero() {
        y.set(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    assert_eq!(A.nzval.len(), A.nnz());
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.m);

    //y += A*x
    if a == T::one() {
        for (j, xj) in x.iter().enumerate() {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] += A.nzval[i] * *xj;
            }
        }
    } else if a == -T::one() {
        for (j, xj) in x.iter().enumerate() {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] -= A.nzval[i] * *xj;
            }
        }
    } else {
        for (j, xj) in x.iter().enumerate() {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] += a * A.nzval[i] * *xj;
            }
        }
    }
}

#[test]
fn test_csc_gemv() {
    // A = [1.  3.  5.]
    //     [2.  0.  6.]
    //     [0.  4.  7.]
    let A = CscMatrix::new(
        3,
        3,
        vec![0, 2, 4, 7],
        vec![0, 1, 0, 2, 0, 1, 2],
        vec![1., 2., 3., 4., 5., 6., 7.],
    );
    let x = [1., 2., 3.];

    let mut y = vec![0.; 3];
    A.gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![22., 20., 29.]);

    let mut y = vec![1.; 3];
    A.gemv(&mut y, &x, -1., 1.);
    assert_eq!(y, vec![-21., -19., -28.]);

    let mut y = vec![1.; 3];
    A.gemv(&mut y, &x, 2., -1.);
    assert_eq!(y, vec![43., 39., 57.]);
}
