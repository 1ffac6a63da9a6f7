use num_traits::Num;
use powiter_kernels::ops::dot_product_kernel;

use crate::{
    error::OperatorError,
    operator::{check_multiply_dims, LinearOperator},
};

/// A dense matrix stored contiguously in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<T>,
}

impl<T: Num + Copy> DenseMatrix<T> {
    /// Create a matrix of the given shape filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// Create a matrix from row-major data.
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows.
    /// * `cols` - Number of columns.
    /// * `data` - The matrix entries, row after row.
    ///
    /// # Errors
    ///
    /// If `data` does not hold exactly `rows * cols` elements, an `InvalidShape` error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use powiter_operator::DenseMatrix;
    ///
    /// let a = DenseMatrix::from_shape_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(a.get(1, 0), Some(4));
    /// assert!(DenseMatrix::from_shape_vec(2, 2, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, OperatorError> {
        if data.len() != rows * cols {
            return Err(OperatorError::InvalidShape {
                expected: rows * cols,
                actual: data.len(),
            });
        }

        Ok(Self { rows, cols, data })
    }

    /// Create a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }

        Self { rows, cols, data }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the entry at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Overwrite the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), OperatorError> {
        if row >= self.rows || col >= self.cols {
            return Err(OperatorError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// The entries of row `row`, or `None` when out of bounds.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// The underlying row-major data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl DenseMatrix<f64> {
    /// Copy the matrix into a [`faer::Mat`].
    pub fn to_faer(&self) -> faer::Mat<f64> {
        faer::Mat::from_fn(self.rows, self.cols, |i, j| self.data[i * self.cols + j])
    }
}

impl<T: Num + Copy> LinearOperator<T> for DenseMatrix<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn multiply(&self, input: &[T], output: &mut [T]) -> Result<(), OperatorError> {
        check_multiply_dims(self.rows, self.cols, input.len(), output.len())?;

        // NOTE: guard against chunks_exact(0) for matrices without columns
        if self.cols == 0 {
            output.iter_mut().for_each(|y| *y = T::zero());
            return Ok(());
        }

        for (y, row) in output.iter_mut().zip(self.data.chunks_exact(self.cols)) {
            *y = dot_product_kernel(row, input)?;
        }

        Ok(())
    }
}

impl<T: std::fmt::Display> std::fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for row in self.data.chunks_exact(self.cols) {
            for v in row {
                write!(f, "{:>8.2}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_shape_vec_invalid() {
        let result = DenseMatrix::from_shape_vec(2, 3, vec![1.0; 5]);
        assert_eq!(
            result,
            Err(OperatorError::InvalidShape {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_get_set() -> Result<(), OperatorError> {
        let mut a = DenseMatrix::<i32>::zeros(2, 2);
        a.set(0, 1, 7)?;
        assert_eq!(a.get(0, 1), Some(7));
        assert_eq!(a.get(1, 1), Some(0));
        assert_eq!(a.get(2, 0), None);
        assert_eq!(
            a.set(0, 2, 1),
            Err(OperatorError::IndexOutOfBounds {
                row: 0,
                col: 2,
                rows: 2,
                cols: 2
            })
        );
        Ok(())
    }

    #[test]
    fn test_row() {
        let a = DenseMatrix::from_fn(3, 2, |i, j| (10 * i + j) as u32);
        assert_eq!(a.row(1), Some(&[10u32, 11][..]));
        assert_eq!(a.row(3), None);
    }

    #[test]
    fn test_multiply_rectangular() -> Result<(), OperatorError> {
        let a = DenseMatrix::from_shape_vec(2, 3, vec![1.0, 2.0, 3.0, -1.0, 0.0, 1.0])?;
        let mut y = vec![0.0; 2];
        a.multiply(&[1.0, 1.0, 2.0], &mut y)?;
        assert_eq!(y, vec![9.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_multiply_overwrites_output() -> Result<(), OperatorError> {
        let a = DenseMatrix::<f32>::identity(2);
        let mut y = vec![100.0; 2];
        a.multiply(&[0.5, -0.5], &mut y)?;
        assert_eq!(y, vec![0.5, -0.5]);
        Ok(())
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = DenseMatrix::<f64>::zeros(3, 4);
        let mut y = vec![0.0; 3];
        assert_eq!(
            a.multiply(&[1.0; 3], &mut y),
            Err(OperatorError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_to_faer() {
        let a = DenseMatrix::from_fn(2, 3, |i, j| (i + 2 * j) as f64);
        let m = a.to_faer();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        for i in 0..2 {
            for j in 0..3 {
                assert_relative_eq!(m[(i, j)], a.get(i, j).unwrap());
            }
        }
    }

    #[test]
    fn test_display() {
        let a = DenseMatrix::from_shape_vec(2, 2, vec![2.0, -1.0, -1.0, 2.0]).unwrap();
        assert_eq!(format!("{}", a), "    2.00   -1.00\n   -1.00    2.00\n");
    }
}
