use std::collections::TryReserveError;

// Allocation helpers for sizes taken from untrusted input.  They
// report failure instead of aborting the process.

pub(crate) fn try_with_capacity<T>(len: usize) -> Result<Vec<T>, TryReserveError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    Ok(v)
}

pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut v = try_with_capacity(len)?;
    v.resize(len, value);
    Ok(v)
}

#[test]
fn test_try_filled() {
    assert_eq!(try_filled(3, 1.5).unwrap(), vec![1.5; 3]);
    assert!(try_filled(0, 0u8).unwrap().is_empty());
    assert!(try_filled(usize::MAX / 2, 0.0f64).is_err());
}
