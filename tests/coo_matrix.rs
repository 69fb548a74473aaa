#![allow(non_snake_case)]

use mmsolve::algebra::*;

#[test]
fn test_coo_capacity_bound() {
    let k = 5;
    let mut A = CooMatrix::<f64>::new(3, k);
    for p in 0..k {
        A.put(p % 3, (p + 1) % 3, p as f64).unwrap();
    }
    assert_eq!(A.nnz(), k);
    assert_eq!(
        A.put(0, 0, 1.0),
        Err(CooError::CapacityExceeded { capacity: k })
    );
    assert_eq!(A.nnz(), k);
}

#[test]
fn test_coo_index_range() {
    let mut A = CooMatrix::<f64>::new(4, 8);
    for (i, j) in [(4, 0), (0, 4), (usize::MAX, 1)] {
        assert!(matches!(
            A.put(i, j, 1.0),
            Err(CooError::IndexOutOfRange { dim: 4, .. })
        ));
    }
    assert!(A.is_empty());

    // the row index is checked first
    assert!(matches!(
        A.put(9, 9, 1.0),
        Err(CooError::IndexOutOfRange {
            axis: Axis::Row,
            ..
        })
    ));
}

#[test]
fn test_coo_mat_vec_mul_scaled() {
    // A = [1.  0.  2.]
    //     [0.  3.  0.]
    //     [4.  0.  5.]
    let mut A = CooMatrix::<f64>::new(3, 5);
    A.put(0, 0, 1.).unwrap();
    A.put(2, 0, 4.).unwrap();
    A.put(1, 1, 3.).unwrap();
    A.put(0, 2, 2.).unwrap();
    A.put(2, 2, 5.).unwrap();

    let u = [1., 2., 3.];
    let mut v = vec![0.; 3];
    A.mat_vec_mul(&mut v, 2., &u).unwrap();
    assert_eq!(v, vec![14., 12., 38.]);

    let mut short = vec![0.; 2];
    assert_eq!(
        A.mat_vec_mul(&mut short, 1., &u),
        Err(CooError::IncompatibleDimension { dim: 3, v: 2, u: 3 })
    );
}

#[test]
fn test_coo_triangle_storage() {
    // lower triangle of
    // A = [2.  1.  0.]
    //     [1.  2.  1.]
    //     [0.  1.  2.]
    let mut L = CooMatrix::<f64>::new(3, 5);
    L.storage = TripletStorage::Triangle;
    L.symmetry = MatrixSymmetry::Symmetric;
    for (i, j, v) in [(0, 0, 2.), (1, 0, 1.), (1, 1, 2.), (2, 1, 1.), (2, 2, 2.)] {
        L.put(i, j, v).unwrap();
    }

    let mut v = vec![0.; 3];
    L.mat_vec_mul(&mut v, 1., &[1., 1., 1.]).unwrap();
    assert_eq!(v, vec![3., 4., 3.]);

    // conversion keeps the stored triangle only
    let Lcsc = CscMatrix::from_coo(&L).unwrap();
    assert_eq!(Lcsc.nnz(), 5);
    assert_eq!(Lcsc.get_entry((0, 1)), None);
    assert_eq!(Lcsc.get_entry((1, 0)), Some(1.));
}
