//! Structured offsets that perturb an operator without touching its storage.
//!
//! Subtracting a mean vector from every row of a sparse data matrix would
//! make it dense. Representing the shift as a rank-one offset keeps the
//! underlying operator sparse:
//!
//! - [`RowOffsetOperator`]: `A + 1 wᵗ`, adds `w·v` to every output entry;
//! - [`ColumnOffsetOperator`]: `A + w 1ᵗ`, adds `w * sum(v)`;
//! - [`DiagonalOffsetOperator`]: `A + diag(d)`, e.g. a ridge term.
//!
//! Row and column offsets are each other's transpose. They only agree when
//! the offset is uniform, in which case both add `c * sum(v)` to every entry.

use std::sync::Arc;

use nalgebra::DVector;

use crate::error::{Result, check_dimension};
use crate::operator::{LinearOperator, OperatorRef, check_input};

/// The diagonal added by [`DiagonalOffsetOperator`].
#[derive(Debug, Clone, PartialEq)]
pub enum DiagonalOffset {
    /// Same value on every diagonal entry.
    Scalar(f64),
    /// One value per diagonal entry.
    Vector(DVector<f64>),
}

/// `A + diag(d)` for a square operator `A`.
#[derive(Debug, Clone)]
pub struct DiagonalOffsetOperator {
    inner: OperatorRef,
    offset: DiagonalOffset,
}

impl DiagonalOffsetOperator {
    /// Add the same value `d` to every diagonal entry.
    pub fn scalar(inner: OperatorRef, d: f64) -> Result<Self> {
        check_dimension(inner.num_rows(), inner.num_cols())?;
        Ok(Self {
            inner,
            offset: DiagonalOffset::Scalar(d),
        })
    }

    /// Add `d[i]` to diagonal entry `i`.
    pub fn vector(inner: OperatorRef, d: DVector<f64>) -> Result<Self> {
        check_dimension(inner.num_rows(), inner.num_cols())?;
        check_dimension(inner.num_rows(), d.len())?;
        Ok(Self {
            inner,
            offset: DiagonalOffset::Vector(d),
        })
    }

    pub fn offset(&self) -> &DiagonalOffset {
        &self.offset
    }
}

impl LinearOperator for DiagonalOffsetOperator {
    fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.inner.num_cols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        let mut y = self.inner.times(v)?;
        match &self.offset {
            DiagonalOffset::Scalar(d) => y.axpy(*d, v, 1.0),
            DiagonalOffset::Vector(d) => y += d.component_mul(v),
        }
        Ok(y)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self {
            inner: self.inner.transpose(),
            offset: self.offset.clone(),
        })
    }

    fn diagonal(&self) -> Option<DVector<f64>> {
        let mut diag = self.inner.diagonal()?;
        match &self.offset {
            DiagonalOffset::Scalar(d) => diag.add_scalar_mut(*d),
            DiagonalOffset::Vector(d) => diag += d,
        }
        Some(diag)
    }
}

/// `A + 1 wᵗ`: adds `w·v` to every entry of `A v`.
///
/// `w` has length `num_cols(A)`; `1` is the all-ones vector of length
/// `num_rows(A)`.
#[derive(Debug, Clone)]
pub struct RowOffsetOperator {
    inner: OperatorRef,
    offset: DVector<f64>,
}

impl RowOffsetOperator {
    /// Fails unless `offset.len() == inner.num_cols()`.
    pub fn new(inner: OperatorRef, offset: DVector<f64>) -> Result<Self> {
        check_dimension(inner.num_cols(), offset.len())?;
        Ok(Self { inner, offset })
    }

    /// Offset with every element equal to `value`.
    pub fn uniform(inner: OperatorRef, value: f64) -> Self {
        let offset = DVector::from_element(inner.num_cols(), value);
        Self { inner, offset }
    }

    pub fn offset(&self) -> &DVector<f64> {
        &self.offset
    }
}

impl LinearOperator for RowOffsetOperator {
    fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.inner.num_cols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        let mut y = self.inner.times(v)?;
        y.add_scalar_mut(self.offset.dot(v));
        Ok(y)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(ColumnOffsetOperator {
            inner: self.inner.transpose(),
            offset: self.offset.clone(),
        })
    }
}

/// `A + w 1ᵗ`: adds `w * sum(v)` to `A v`.
///
/// `w` has length `num_rows(A)`; `1` is the all-ones vector of length
/// `num_cols(A)`.
#[derive(Debug, Clone)]
pub struct ColumnOffsetOperator {
    inner: OperatorRef,
    offset: DVector<f64>,
}

impl ColumnOffsetOperator {
    /// Fails unless `offset.len() == inner.num_rows()`.
    pub fn new(inner: OperatorRef, offset: DVector<f64>) -> Result<Self> {
        check_dimension(inner.num_rows(), offset.len())?;
        Ok(Self { inner, offset })
    }

    /// Offset with every element equal to `value`.
    pub fn uniform(inner: OperatorRef, value: f64) -> Self {
        let offset = DVector::from_element(inner.num_rows(), value);
        Self { inner, offset }
    }

    pub fn offset(&self) -> &DVector<f64> {
        &self.offset
    }
}

impl LinearOperator for ColumnOffsetOperator {
    fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.inner.num_cols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        let mut y = self.inner.times(v)?;
        y.axpy(v.sum(), &self.offset, 1.0);
        Ok(y)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(RowOffsetOperator {
            inner: self.inner.transpose(),
            offset: self.offset.clone(),
        })
    }
}
