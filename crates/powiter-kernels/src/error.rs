use thiserror::Error;

/// An error type for vector kernels.
#[derive(Error, Debug, PartialEq)]
pub enum KernelError {
    /// Length mismatch for vector operations
    #[error("Length mismatch: expected equal length vectors, got {0} and {1}")]
    LengthMismatch(usize, usize),

    /// The vector has zero euclidean norm and cannot be normalized.
    #[error("Cannot normalize a vector with zero norm")]
    ZeroNorm,
}
