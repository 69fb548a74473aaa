//! Solution of Matrix Market systems with a direct sparse solver.
//!
//! A [`MatrixMarketSolver`] runs the complete sequence of stages: read
//! the file, convert to CSC, factor and solve with a
//! [`LinearSolverEngine`], then check the solution both through the
//! [residual norm](residual_norm) and by recomputing `A·x` from the
//! original triplets ([`verify`]).
//!
//! With the `faer-sparse` feature the [`FaerLuEngine`] is available as a
//! ready made engine.

pub mod engine;
mod error;
mod pipeline;
pub mod residuals;
mod settings;

pub use engine::*;
pub use error::*;
pub use pipeline::*;
pub use residuals::*;
pub use settings::*;
