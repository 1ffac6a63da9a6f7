#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for eigenvalue solvers.
///
/// Defines [`EigenError`] for invalid operators, degenerate iterates and non-convergence.
pub mod error;

/// Observers receiving per-iteration progress of the solvers.
pub mod observer;

mod power_iteration;
pub use power_iteration::*;

pub use error::EigenError;
pub use observer::{FnObserver, IterationEvent, IterationObserver, LogObserver, NoopObserver};
