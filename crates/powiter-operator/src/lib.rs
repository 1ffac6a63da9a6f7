#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Coordinate-list (triplet) matrix accumulator.
pub mod coo;

/// Dense row-major matrix.
pub mod dense;

/// Error types for the operator module.
///
/// Defines [`OperatorError`] for handling failures while building or applying operators.
pub mod error;

/// The [`LinearOperator`] capability consumed by the iterative solvers.
pub mod operator;

/// Compressed sparse row matrix.
pub mod sparse;

pub use coo::CooMatrix;
pub use dense::DenseMatrix;
pub use error::OperatorError;
pub use operator::LinearOperator;
pub use sparse::SparseMatrix;
