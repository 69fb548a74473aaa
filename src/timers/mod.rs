//! Wall-clock timing of solve phases.

#[allow(clippy::module_inception)]
mod timers;
pub use self::timers::Timers;
pub(crate) use self::timers::timeit;
