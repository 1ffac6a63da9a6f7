use num_traits::Num;

use crate::{
    dense::DenseMatrix,
    error::OperatorError,
    operator::{check_multiply_dims, LinearOperator},
};

/// A sparse matrix in compressed sparse row (CSR) format.
///
/// Row `i` owns the entries `indptr[i]..indptr[i + 1]` of `indices` (column indices) and
/// `data` (values).
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) indptr: Vec<usize>,
    pub(crate) indices: Vec<usize>,
    pub(crate) data: Vec<T>,
}

impl<T: Num + Copy> SparseMatrix<T> {
    /// Create a CSR matrix from its raw arrays.
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows.
    /// * `cols` - Number of columns.
    /// * `indptr` - Row pointers, `rows + 1` non-decreasing offsets starting at 0.
    /// * `indices` - Column index of each stored entry.
    /// * `data` - Value of each stored entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSparseStructure` if the arrays do not describe a valid CSR matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use powiter_operator::SparseMatrix;
    ///
    /// // [[1, 0], [0, 2]]
    /// let a = SparseMatrix::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![1.0, 2.0]).unwrap();
    /// assert_eq!(a.nnz(), 2);
    /// ```
    pub fn new(
        rows: usize,
        cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
    ) -> Result<Self, OperatorError> {
        if indptr.len() != rows + 1 {
            return Err(OperatorError::InvalidSparseStructure(format!(
                "indptr has {} entries, expected {}",
                indptr.len(),
                rows + 1
            )));
        }

        if indptr[0] != 0 {
            return Err(OperatorError::InvalidSparseStructure(format!(
                "indptr must start at 0, got {}",
                indptr[0]
            )));
        }

        if indptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(OperatorError::InvalidSparseStructure(
                "indptr must be non-decreasing".to_string(),
            ));
        }

        if indices.len() != data.len() {
            return Err(OperatorError::InvalidSparseStructure(format!(
                "indices ({}) and data ({}) lengths differ",
                indices.len(),
                data.len()
            )));
        }

        if indptr[rows] != data.len() {
            return Err(OperatorError::InvalidSparseStructure(format!(
                "indptr ends at {}, but {} entries are stored",
                indptr[rows],
                data.len()
            )));
        }

        if let Some(&col) = indices.iter().find(|&&c| c >= cols) {
            return Err(OperatorError::InvalidSparseStructure(format!(
                "column index {} out of bounds for {} columns",
                col, cols
            )));
        }

        Ok(Self {
            rows,
            cols,
            indptr,
            indices,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Row pointers.
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column index of each stored entry.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Value of each stored entry.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Expand into a dense matrix. Repeated column indices in a row are summed.
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut data = vec![T::zero(); self.rows * self.cols];
        for i in 0..self.rows {
            for k in self.indptr[i]..self.indptr[i + 1] {
                let idx = i * self.cols + self.indices[k];
                data[idx] = data[idx] + self.data[k];
            }
        }

        DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

impl<T: Num + Copy> LinearOperator<T> for SparseMatrix<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn multiply(&self, input: &[T], output: &mut [T]) -> Result<(), OperatorError> {
        check_multiply_dims(self.rows, self.cols, input.len(), output.len())?;

        for (i, y) in output.iter_mut().enumerate() {
            let (start, end) = (self.indptr[i], self.indptr[i + 1]);
            *y = self.indices[start..end]
                .iter()
                .zip(self.data[start..end].iter())
                .fold(T::zero(), |acc, (&j, &v)| acc + v * input[j]);
        }

        Ok(())
    }
}
