use num_traits::Num;

use crate::{
    dense::DenseMatrix,
    error::OperatorError,
    operator::{check_multiply_dims, LinearOperator},
    sparse::SparseMatrix,
};

/// A coordinate-list matrix that accumulates `(row, col, value)` triplets.
///
/// Entries may be added in any order and repeated; duplicates are summed when converting to
/// another representation or when multiplying.
///
/// # Example
///
/// ```
/// use powiter_operator::CooMatrix;
///
/// let mut coo = CooMatrix::new(2, 2);
/// coo.add_sym(0, 1, -1.0).unwrap();
/// coo.add(0, 0, 2.0).unwrap();
///
/// let dense = coo.to_dense();
/// assert_eq!(dense.as_slice(), &[2.0, -1.0, -1.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix<T> {
    rows: usize,
    cols: usize,
    entries: Vec<(usize, usize, T)>,
}

impl<T: Num + Copy> CooMatrix<T> {
    /// Create an empty accumulator for a `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored triplets, duplicates included.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// The stored triplets in insertion order.
    pub fn entries(&self) -> &[(usize, usize, T)] {
        &self.entries
    }

    /// Add `value` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the position lies outside the matrix.
    pub fn add(&mut self, row: usize, col: usize, value: T) -> Result<(), OperatorError> {
        if row >= self.rows || col >= self.cols {
            return Err(OperatorError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.entries.push((row, col, value));
        Ok(())
    }

    /// Add `value` at `(row, col)` and, off the diagonal, at the mirrored `(col, row)`.
    ///
    /// Both positions are validated before anything is stored.
    pub fn add_sym(&mut self, row: usize, col: usize, value: T) -> Result<(), OperatorError> {
        if row >= self.rows || col >= self.cols || col >= self.rows || row >= self.cols {
            return Err(OperatorError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        self.entries.push((row, col, value));
        if row != col {
            self.entries.push((col, row, value));
        }
        Ok(())
    }

    /// Triplets sorted by `(row, col)` with duplicates summed.
    fn merged_entries(&self) -> Vec<(usize, usize, T)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|&(i, j, _)| (i, j));

        let mut merged: Vec<(usize, usize, T)> = Vec::with_capacity(sorted.len());
        for (i, j, v) in sorted {
            match merged.last_mut() {
                Some(last) if last.0 == i && last.1 == j => last.2 = last.2 + v,
                _ => merged.push((i, j, v)),
            }
        }
        merged
    }

    /// Convert into a compressed sparse row matrix.
    ///
    /// Column indices within a row come out sorted and duplicates are summed.
    pub fn to_sparse(&self) -> SparseMatrix<T> {
        let merged = self.merged_entries();

        let mut indptr = vec![0; self.rows + 1];
        for &(i, _, _) in merged.iter() {
            indptr[i + 1] += 1;
        }
        for i in 0..self.rows {
            indptr[i + 1] += indptr[i];
        }

        let (indices, data) = merged.into_iter().map(|(_, j, v)| (j, v)).unzip();

        // every triplet was bounds checked on insertion
        SparseMatrix {
            rows: self.rows,
            cols: self.cols,
            indptr,
            indices,
            data,
        }
    }

    /// Convert into a dense matrix, summing duplicates.
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut dense = DenseMatrix::zeros(self.rows, self.cols);
        for &(i, j, v) in self.entries.iter() {
            let idx = i * self.cols + j;
            dense.data[idx] = dense.data[idx] + v;
        }
        dense
    }
}

impl<T: Num + Copy> LinearOperator<T> for CooMatrix<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn multiply(&self, input: &[T], output: &mut [T]) -> Result<(), OperatorError> {
        check_multiply_dims(self.rows, self.cols, input.len(), output.len())?;

        output.iter_mut().for_each(|y| *y = T::zero());
        for &(i, j, v) in self.entries.iter() {
            output[i] = output[i] + v * input[j];
        }

        Ok(())
    }
}
