use powiter_kernels::KernelError;
use powiter_operator::OperatorError;
use thiserror::Error;

/// An error type for eigenvalue solvers.
#[derive(Error, Debug, PartialEq)]
pub enum EigenError {
    /// The operator does not map a space onto itself.
    #[error("Invalid operator: expected a square operator, got {rows}x{cols}")]
    InvalidOperator {
        /// Number of rows of the operator
        rows: usize,
        /// Number of columns of the operator
        cols: usize,
    },

    /// The operator has dimension zero.
    #[error("Invalid operator: the operator is empty")]
    EmptyOperator,

    /// The convergence tolerance is not a finite positive number.
    #[error("Invalid tolerance {0}: expected a finite positive value")]
    InvalidTolerance(f64),

    /// The iterate collapsed onto the zero vector and cannot be normalized.
    ///
    /// This happens when the operator maps the current vector to zero, e.g. for the zero
    /// operator or when the seed lies in the operator null space.
    #[error("Degenerate vector: the iterate has zero norm at iteration {iteration}")]
    DegenerateVector {
        /// Iteration at which the zero vector appeared
        iteration: usize,
    },

    /// The iteration budget was exhausted before reaching the tolerance.
    #[error("No convergence after {iterations} iterations (last rate {rate:e})")]
    NonConvergence {
        /// Number of iterations performed
        iterations: usize,
        /// Relative change of the estimate at the last iteration
        rate: f64,
    },

    /// Operator error
    #[error(transparent)]
    OperatorError(#[from] OperatorError),

    /// Kernel error
    #[error(transparent)]
    KernelError(#[from] KernelError),
}
