//! Sparse matrix operator backed by faer's compressed sparse column storage.
//!
//! The transpose shares the same storage and only flips the traversal, so
//! neither `times` nor `transpose` ever densifies the matrix.

use std::sync::Arc;

use faer::sparse::{SparseColMat, Triplet};
use nalgebra::DVector;

use crate::error::{Error, Result};
use crate::operator::{LinearOperator, OperatorRef, check_input};

/// Sparse real-valued matrix.
///
/// Wraps a faer `SparseColMat<usize, f64>`. When `transposed` is set the
/// operator acts as `Aᵗ` on the same storage.
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    matrix: Arc<SparseColMat<usize, f64>>,
    transposed: bool,
}

impl SparseMatrix {
    /// Create from an existing sparse matrix.
    pub fn from_matrix(matrix: SparseColMat<usize, f64>) -> Self {
        Self {
            matrix: Arc::new(matrix),
            transposed: false,
        }
    }

    /// Create from triplets `(row, col, value)`.
    ///
    /// Duplicate entries at the same position are summed.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self> {
        if let Some(&(r, c, _)) = triplets.iter().find(|&&(r, c, _)| r >= rows || c >= cols) {
            return Err(Error::InvalidArgument(format!(
                "triplet ({r}, {c}) outside a {rows}x{cols} matrix"
            )));
        }

        let faer_triplets: Vec<_> = triplets
            .iter()
            .map(|&(r, c, v)| Triplet::new(r, c, v))
            .collect();

        SparseColMat::<usize, f64>::try_new_from_triplets(rows, cols, &faer_triplets)
            .map(Self::from_matrix)
            .map_err(|e| Error::InvalidArgument(format!("invalid sparse triplets: {e:?}")))
    }

    /// Get a reference to the underlying storage (untransposed).
    pub fn matrix(&self) -> &SparseColMat<usize, f64> {
        &self.matrix
    }

    /// Whether this operator applies the transpose of its storage.
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.matrix.as_ref().val().len()
    }
}

impl LinearOperator for SparseMatrix {
    fn num_rows(&self) -> usize {
        if self.transposed {
            self.matrix.ncols()
        } else {
            self.matrix.nrows()
        }
    }

    fn num_cols(&self) -> usize {
        if self.transposed {
            self.matrix.nrows()
        } else {
            self.matrix.ncols()
        }
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;

        let mat_ref = self.matrix.as_ref();
        let col_ptrs = mat_ref.col_ptr();
        let row_indices = mat_ref.row_idx();
        let values = mat_ref.val();
        let ncols = self.matrix.ncols();

        let mut y = DVector::zeros(self.num_rows());

        if self.transposed {
            // y[j] = sum_i A[i, j] * v[i]: a dot product per stored column
            for j in 0..ncols {
                let mut acc = 0.0;
                for idx in col_ptrs[j]..col_ptrs[j + 1] {
                    acc += values[idx] * v[row_indices[idx]];
                }
                y[j] = acc;
            }
        } else {
            // y += A[:, j] * v[j] for each column
            for j in 0..ncols {
                let vj = v[j];
                for idx in col_ptrs[j]..col_ptrs[j + 1] {
                    y[row_indices[idx]] += values[idx] * vj;
                }
            }
        }

        Ok(y)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self {
            matrix: Arc::clone(&self.matrix),
            transposed: !self.transposed,
        })
    }

    fn diagonal(&self) -> Option<DVector<f64>> {
        let mat_ref = self.matrix.as_ref();
        let col_ptrs = mat_ref.col_ptr();
        let row_indices = mat_ref.row_idx();
        let values = mat_ref.val();

        let n = self.matrix.nrows().min(self.matrix.ncols());
        let mut diag = DVector::zeros(n);
        for j in 0..n {
            for idx in col_ptrs[j]..col_ptrs[j + 1] {
                if row_indices[idx] == j {
                    diag[j] += values[idx];
                }
            }
        }
        Some(diag)
    }
}
