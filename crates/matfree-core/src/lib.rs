//! Matrix-free linear operator algebra.
//!
//! This crate provides:
//! - The [`LinearOperator`] trait: dimensions, `times`, `transpose`
//! - Concrete operators: [`DenseMatrix`] (nalgebra), [`SparseMatrix`] (faer CSC),
//!   [`FnOperator`] (closures)
//! - Composite operators: sum, product, scale, transpose, `AᵗA`
//! - Offset operators that perturb an operator without densifying it
//! - Algebra helpers that materialize dense results when that is cheaper

pub mod algebra;
pub mod composite;
pub mod error;
pub mod function;
pub mod matrix;
pub mod offset;
pub mod operator;
pub mod sparse;
pub mod vector;

pub use algebra::LinearOperatorExt;
pub use composite::{
    ProductOperator, ScaledOperator, SquaredOperator, SumOperator, TransposeOperator,
};
pub use error::{Error, ExecutionError, Result};
pub use function::FnOperator;
pub use matrix::DenseMatrix;
pub use offset::{ColumnOffsetOperator, DiagonalOffset, DiagonalOffsetOperator, RowOffsetOperator};
pub use operator::{LinearOperator, OperatorRef};
pub use sparse::SparseMatrix;

pub use nalgebra::{DMatrix, DVector};
