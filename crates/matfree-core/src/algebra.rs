//! Operator algebra.
//!
//! The free functions combine operators and pick the cheapest representation:
//! when every operand is a dense matrix the result is materialized as a new
//! [`DenseMatrix`], otherwise a composite wrapper is built. Both paths give
//! the same `times` results.

use std::sync::Arc;

use nalgebra::DVector;

use crate::composite::{
    ProductOperator, ScaledOperator, SquaredOperator, SumOperator, TransposeOperator,
};
use crate::error::Result;
use crate::matrix::{DenseMatrix, dense_product, dense_scale, dense_sum};
use crate::offset::{ColumnOffsetOperator, DiagonalOffsetOperator, RowOffsetOperator};
use crate::operator::{LinearOperator, OperatorRef};

/// `A + B`.
pub fn sum(a: &OperatorRef, b: &OperatorRef) -> Result<OperatorRef> {
    if let (Some(x), Some(y)) = (a.as_dense(), b.as_dense()) {
        let dense = dense_sum(x, y)?;
        log::trace!("sum: materialized {}x{} dense result", dense.nrows(), dense.ncols());
        return Ok(Arc::new(DenseMatrix::new(dense)));
    }
    Ok(Arc::new(SumOperator::new(Arc::clone(a), Arc::clone(b))?))
}

/// `A B`.
pub fn product(a: &OperatorRef, b: &OperatorRef) -> Result<OperatorRef> {
    if let (Some(x), Some(y)) = (a.as_dense(), b.as_dense()) {
        let dense = dense_product(x, y)?;
        log::trace!("product: materialized {}x{} dense result", dense.nrows(), dense.ncols());
        return Ok(Arc::new(DenseMatrix::new(dense)));
    }
    Ok(Arc::new(ProductOperator::new(Arc::clone(a), Arc::clone(b))?))
}

/// `c A`.
pub fn scale(a: &OperatorRef, c: f64) -> OperatorRef {
    match a.as_dense() {
        Some(x) => Arc::new(DenseMatrix::new(dense_scale(x, c))),
        None => Arc::new(ScaledOperator::new(Arc::clone(a), c)),
    }
}

/// `Aᵗ`.
pub fn transpose(a: &OperatorRef) -> OperatorRef {
    match a.as_dense() {
        Some(x) => Arc::new(DenseMatrix::new(x.transpose())),
        None => Arc::new(TransposeOperator::new(Arc::clone(a))),
    }
}

/// Builder-style combinators on shared operators.
pub trait LinearOperatorExt {
    /// `self + other`, see [`sum`].
    fn plus(&self, other: &OperatorRef) -> Result<OperatorRef>;

    /// `self * other`, see [`product`].
    fn then(&self, other: &OperatorRef) -> Result<OperatorRef>;

    /// `c * self`, see [`scale`].
    fn scaled(&self, c: f64) -> OperatorRef;

    /// `selfᵗ self`.
    fn squared(&self) -> OperatorRef;

    /// `self + d I`.
    fn with_diagonal_offset(&self, d: f64) -> Result<OperatorRef>;

    /// `self + 1 wᵗ`.
    fn with_row_offset(&self, w: DVector<f64>) -> Result<OperatorRef>;

    /// `self + w 1ᵗ`.
    fn with_column_offset(&self, w: DVector<f64>) -> Result<OperatorRef>;
}

impl LinearOperatorExt for OperatorRef {
    fn plus(&self, other: &OperatorRef) -> Result<OperatorRef> {
        sum(self, other)
    }

    fn then(&self, other: &OperatorRef) -> Result<OperatorRef> {
        product(self, other)
    }

    fn scaled(&self, c: f64) -> OperatorRef {
        scale(self, c)
    }

    fn squared(&self) -> OperatorRef {
        Arc::new(SquaredOperator::new(Arc::clone(self)))
    }

    fn with_diagonal_offset(&self, d: f64) -> Result<OperatorRef> {
        Ok(Arc::new(DiagonalOffsetOperator::scalar(Arc::clone(self), d)?))
    }

    fn with_row_offset(&self, w: DVector<f64>) -> Result<OperatorRef> {
        Ok(Arc::new(RowOffsetOperator::new(Arc::clone(self), w)?))
    }

    fn with_column_offset(&self, w: DVector<f64>) -> Result<OperatorRef> {
        Ok(Arc::new(ColumnOffsetOperator::new(Arc::clone(self), w)?))
    }
}
