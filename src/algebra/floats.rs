#![allow(non_snake_case)]
use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Main trait for floating point values stored in sparse matrices.
///
/// Implemented for every type satisfying the bounds, which in practice means
/// `f32` and `f64`.  `FloatT` relies on [`num_traits`](num_traits) for most of
/// its constituent trait bounds.
pub trait FloatT:
    'static + Send + Float + NumAssign + Default + FromPrimitive + Display + LowerExp + Debug + Sized
{
}

impl<T> FloatT for T where
    T: 'static
        + Send
        + Float
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
{
}

/// Trait for converting Rust primitives to [`FloatT`](crate::algebra::FloatT)
///
/// Used for settings defaults and numeric constants, so that we can write
/// `(1e-10).as_T()` rather than `T::from_f64(1e-10).unwrap()`.
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($ty:ty, $ident:ident) => {
        impl<T> AsFloatT<T> for $ty
        where
            T: std::ops::Mul<T, Output = T> + FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$ident(*self).unwrap()
            }
        }
    };
}
impl_as_FloatT!(f64, from_f64);
