//! Sparse matrix types and the kernels used to validate solutions.
//!
//! [`CooMatrix`] holds triplets as they are read from a file,
//! [`CscMatrix`] is the compressed column form consumed by direct solvers.
//! All types are generic over [`FloatT`].

mod coo;
mod csc;
mod error_types;
mod floats;
mod math_traits;
mod utils;
mod vecmath;

pub use coo::*;
pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub(crate) use utils::*;
