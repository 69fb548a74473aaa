use super::FloatT;

// Dense vector and sparse matrix-vector kernels shared by the
// residual checks.  Implemented generically for floats of type FloatT.

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T;

    /// set all elements to the same value
    fn set(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise negation of entries.
    fn negate(&mut self) -> &mut Self;

    /// Infinity norm.  Returns NaN if any entry is NaN.
    fn norm_inf(&self) -> Self::T;
}

/// Matrix operations for matrices of [`FloatT`](crate::algebra::FloatT)

pub trait MatrixVectorMultiply {
    type T: FloatT;

    /// BLAS-like general matrix-vector multiply.  Produces `y = a*self*x + b*y`
    fn gemv(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T, b: Self::T);
}

/// Dimension queries common to the sparse matrix types
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
