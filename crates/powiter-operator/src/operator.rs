use crate::error::OperatorError;

/// A linear map that can be applied to a vector.
///
/// Implementors expose their shape and a matrix-vector product. Solvers such as power
/// iteration only ever talk to this trait, so dense, sparse and coordinate-list storages
/// (or any user type) can be passed interchangeably.
///
/// # Example
///
/// ```
/// use powiter_operator::{DenseMatrix, LinearOperator};
///
/// let a = DenseMatrix::from_shape_vec(2, 2, vec![2.0, 0.0, 0.0, 3.0]).unwrap();
/// let mut y = vec![0.0; 2];
/// a.multiply(&[1.0, 1.0], &mut y).unwrap();
/// assert_eq!(y, vec![2.0, 3.0]);
/// ```
pub trait LinearOperator<T> {
    /// Number of rows, i.e. the length of the output vector.
    fn rows(&self) -> usize;

    /// Number of columns, i.e. the length of the input vector.
    fn cols(&self) -> usize;

    /// Whether the operator maps a space onto itself.
    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Compute `output = A * input`, overwriting `output`.
    ///
    /// # Errors
    ///
    /// Returns [`OperatorError::DimensionMismatch`] if `input` does not have `cols()`
    /// elements or `output` does not have `rows()` elements.
    fn multiply(&self, input: &[T], output: &mut [T]) -> Result<(), OperatorError>;
}

impl<T, O: LinearOperator<T> + ?Sized> LinearOperator<T> for &O {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn multiply(&self, input: &[T], output: &mut [T]) -> Result<(), OperatorError> {
        (**self).multiply(input, output)
    }
}

impl<T, O: LinearOperator<T> + ?Sized> LinearOperator<T> for Box<O> {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn multiply(&self, input: &[T], output: &mut [T]) -> Result<(), OperatorError> {
        (**self).multiply(input, output)
    }
}

impl LinearOperator<f64> for faer::Mat<f64> {
    fn rows(&self) -> usize {
        self.nrows()
    }

    fn cols(&self) -> usize {
        self.ncols()
    }

    fn multiply(&self, input: &[f64], output: &mut [f64]) -> Result<(), OperatorError> {
        check_multiply_dims(self.nrows(), self.ncols(), input.len(), output.len())?;

        for (i, out) in output.iter_mut().enumerate() {
            *out = input
                .iter()
                .enumerate()
                .map(|(j, &x)| self[(i, j)] * x)
                .sum();
        }

        Ok(())
    }
}

/// Validate the vector lengths of a matrix-vector product against the operator shape.
pub(crate) fn check_multiply_dims(
    rows: usize,
    cols: usize,
    input_len: usize,
    output_len: usize,
) -> Result<(), OperatorError> {
    if input_len != cols {
        return Err(OperatorError::DimensionMismatch {
            expected: cols,
            actual: input_len,
        });
    }

    if output_len != rows {
        return Err(OperatorError::DimensionMismatch {
            expected: rows,
            actual: output_len,
        });
    }

    Ok(())
}
