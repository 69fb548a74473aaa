use super::{FloatT, VectorMath};

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn set(&mut self, c: T) -> &mut Self {
        self.fill(c);
        self
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.iter_mut().for_each(|x| *x *= c);
        self
    }

    fn negate(&mut self) -> &mut Self {
        self.iter_mut().for_each(|x| *x = -*x);
        self
    }

    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for v in self.iter().map(|v| v.abs()) {
            if v.is_nan() {
                return T::nan();
            }
            out = if v > out { v } else { out };
        }
        out
    }
}

#[test]
fn test_norm_inf() {
    let x = [1.0, -7.5, 3.0];
    assert_eq!(x.norm_inf(), 7.5);

    let empty: [f64; 0] = [];
    assert_eq!(empty.norm_inf(), 0.0);

    let x = [1.0, f64::NAN, 3.0];
    assert!(x.norm_inf().is_nan());
}

#[test]
fn test_negate_and_scale() {
    let mut x = vec![1.0, -2.0];
    x.negate().scale(3.0);
    assert_eq!(x, vec![-3.0, 6.0]);
    x.set(0.5);
    assert_eq!(x, vec![0.5, 0.5]);
}
