use powiter_kernels::KernelError;
use thiserror::Error;

/// An error type for linear operators.
#[derive(Error, Debug, PartialEq)]
pub enum OperatorError {
    /// A vector passed to the operator does not have the expected length.
    #[error("Dimension mismatch: expected a vector of length {expected}, got {actual}")]
    DimensionMismatch {
        /// Length required by the operator
        expected: usize,
        /// Length of the vector that was passed
        actual: usize,
    },

    /// Matrix shape does not match the provided data.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Entry index exceeds the matrix bounds.
    #[error("Index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// The row index that was attempted
        row: usize,
        /// The column index that was attempted
        col: usize,
        /// Number of rows of the matrix
        rows: usize,
        /// Number of columns of the matrix
        cols: usize,
    },

    /// The compressed sparse row arrays are inconsistent.
    #[error("Invalid sparse structure: {0}")]
    InvalidSparseStructure(String),

    /// Kernel error
    #[error(transparent)]
    KernelError(#[from] KernelError),
}
