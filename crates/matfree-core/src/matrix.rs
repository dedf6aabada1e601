//! Dense matrix operator backed by `nalgebra`.

use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, check_dimension};
use crate::operator::{LinearOperator, OperatorRef, check_input};

/// A concrete dense matrix.
///
/// Besides acting as a [`LinearOperator`], a dense matrix supports direct
/// algebra (`plus`, `product`, `scale`) that yields another dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: DMatrix<f64>,
}

impl DenseMatrix {
    /// Wrap an existing `nalgebra` matrix.
    pub fn new(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    /// Build from row-major values.
    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        check_dimension(rows * cols, values.len())?;
        Ok(Self::new(DMatrix::from_row_slice(rows, cols, values)))
    }

    /// Build from column-major values.
    pub fn from_column_slice(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        check_dimension(rows * cols, values.len())?;
        Ok(Self::new(DMatrix::from_column_slice(rows, cols, values)))
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self::new(DMatrix::identity(n, n))
    }

    /// Borrow the underlying storage.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Take the underlying storage.
    pub fn into_inner(self) -> DMatrix<f64> {
        self.data
    }

    /// Entry-wise sum `self + other`.
    pub fn plus(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        dense_sum(&self.data, &other.data).map(Self::new)
    }

    /// Matrix product `self * other`.
    pub fn product(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        dense_product(&self.data, &other.data).map(Self::new)
    }

    /// Scalar multiple `c * self`.
    pub fn scale(&self, c: f64) -> DenseMatrix {
        Self::new(dense_scale(&self.data, c))
    }

    /// `Aᵗ (A v)` without forming `AᵗA`.
    pub fn times_squared(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        Ok(self.data.tr_mul(&(&self.data * v)))
    }

    /// Whether the matrix is square and `|a_ij - a_ji| <= tol * max|a|`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        is_symmetric(&self.data, tol)
    }
}

/// Whether `m` is square and `|m_ij - m_ji| <= tol * max|m|`.
pub fn is_symmetric(m: &DMatrix<f64>, tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let scale = m.amax().max(f64::MIN_POSITIVE);
    let n = m.nrows();
    (0..n).all(|i| ((i + 1)..n).all(|j| (m[(i, j)] - m[(j, i)]).abs() <= tol * scale))
}

pub(crate) fn dense_sum(x: &DMatrix<f64>, y: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    check_dimension(x.nrows(), y.nrows())?;
    check_dimension(x.ncols(), y.ncols())?;
    Ok(x + y)
}

pub(crate) fn dense_product(x: &DMatrix<f64>, y: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    check_dimension(x.ncols(), y.nrows())?;
    Ok(x * y)
}

pub(crate) fn dense_scale(x: &DMatrix<f64>, c: f64) -> DMatrix<f64> {
    x * c
}

impl From<DMatrix<f64>> for DenseMatrix {
    fn from(data: DMatrix<f64>) -> Self {
        Self::new(data)
    }
}

impl LinearOperator for DenseMatrix {
    fn num_rows(&self) -> usize {
        self.data.nrows()
    }

    fn num_cols(&self) -> usize {
        self.data.ncols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        Ok(&self.data * v)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self::new(self.data.transpose()))
    }

    fn diagonal(&self) -> Option<DVector<f64>> {
        Some(self.data.diagonal())
    }

    fn as_dense(&self) -> Option<&DMatrix<f64>> {
        Some(&self.data)
    }
}
