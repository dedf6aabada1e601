//! The linear operator abstraction.
//!
//! Iterative methods such as conjugate gradient and Lanczos only ever need the
//! action `y = A * x` of an operator, never its entries. [`LinearOperator`]
//! captures exactly that, so dense matrices, sparse matrices, offset-corrected
//! operators and distributed matrices can all be handed to the same solver.

use std::fmt;
use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, check_dimension};

/// Shared, immutable handle to an operator.
///
/// Composite operators own their operands through this handle, which lets one
/// operator graph be read concurrently by several solves.
pub type OperatorRef = Arc<dyn LinearOperator>;

/// A linear map from vectors of length `num_cols()` to vectors of length
/// `num_rows()`.
///
/// Implementations are immutable once constructed and must be deterministic
/// and free of side effects.
pub trait LinearOperator: Send + Sync + fmt::Debug {
    /// Dimension of the range.
    fn num_rows(&self) -> usize;

    /// Dimension of the domain.
    fn num_cols(&self) -> usize;

    /// Apply the operator: `A * v`.
    ///
    /// Fails with `DimensionMismatch` when `v.len() != num_cols()`.
    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>>;

    /// The transposed operator `Aᵗ`.
    fn transpose(&self) -> OperatorRef;

    /// Main diagonal, when the operator can report it cheaply.
    ///
    /// Only meaningful for square operators. Used by Jacobi preconditioning.
    fn diagonal(&self) -> Option<DVector<f64>> {
        None
    }

    /// Dense backing storage, when the operator is a concrete dense matrix.
    ///
    /// Lets algebra helpers materialize results instead of building
    /// composite wrappers.
    fn as_dense(&self) -> Option<&DMatrix<f64>> {
        None
    }

    /// Whether `num_rows() == num_cols()`.
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}

/// Check that `v` fits the domain of `op`.
#[inline]
pub fn check_input(op: &dyn LinearOperator, v: &DVector<f64>) -> Result<()> {
    check_dimension(op.num_cols(), v.len())
}
