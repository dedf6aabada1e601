//! Conjugate gradient over matrices that live behind an execution substrate.
//!
//! A [`DistributedRowMatrix`] is a [`LinearOperator`] whose rows are held by
//! some external system. Each `times` call is one blocking, all-or-nothing
//! [`MatVecExecutor::multiply`]; the iteration itself stays local.
//!
//! # Module Structure
//!
//! - [`executor`] - In-process [`PartitionedExecutor`]
//! - [`solver`] - [`DistributedConjugateGradientSolver`]

pub mod executor;
pub mod solver;

use std::fmt;
use std::sync::Arc;

use matfree_core::operator::check_input;
use matfree_core::{DVector, Error, ExecutionError, LinearOperator, OperatorRef, Result};

pub use executor::PartitionedExecutor;
pub use solver::DistributedConjugateGradientSolver;

/// Reference to a matrix registered with an executor.
///
/// `num_rows`/`num_cols` describe the operator the handle applies, so a
/// transposed handle reports the swapped shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatrixHandle {
    pub name: String,
    pub num_rows: usize,
    pub num_cols: usize,
    pub transposed: bool,
}

impl MatrixHandle {
    pub fn new(name: impl Into<String>, num_rows: usize, num_cols: usize) -> Self {
        Self {
            name: name.into(),
            num_rows,
            num_cols,
            transposed: false,
        }
    }

    /// Handle to the transpose of the same stored matrix.
    pub fn transposed(&self) -> Self {
        Self {
            name: self.name.clone(),
            num_rows: self.num_cols,
            num_cols: self.num_rows,
            transposed: !self.transposed,
        }
    }
}

impl fmt::Display for MatrixHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{}", self.name, self.num_rows, self.num_cols)?;
        if self.transposed {
            write!(f, ", transposed")?;
        }
        write!(f, ")")
    }
}

/// An execution substrate that multiplies a registered matrix by a vector.
///
/// Calls block until the whole product is available. A failure aborts the
/// multiply; there is no partial result.
pub trait MatVecExecutor: Send + Sync + fmt::Debug {
    fn multiply(
        &self,
        handle: &MatrixHandle,
        v: &DVector<f64>,
    ) -> std::result::Result<DVector<f64>, ExecutionError>;
}

/// A row-partitioned matrix held by a [`MatVecExecutor`].
#[derive(Debug, Clone)]
pub struct DistributedRowMatrix {
    handle: MatrixHandle,
    executor: Arc<dyn MatVecExecutor>,
}

impl DistributedRowMatrix {
    pub fn new(handle: MatrixHandle, executor: Arc<dyn MatVecExecutor>) -> Self {
        Self { handle, executor }
    }

    pub fn handle(&self) -> &MatrixHandle {
        &self.handle
    }

    pub fn executor(&self) -> &Arc<dyn MatVecExecutor> {
        &self.executor
    }
}

impl LinearOperator for DistributedRowMatrix {
    fn num_rows(&self) -> usize {
        self.handle.num_rows
    }

    fn num_cols(&self) -> usize {
        self.handle.num_cols
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        let y = self.executor.multiply(&self.handle, v)?;
        if y.len() != self.handle.num_rows {
            return Err(Error::DimensionMismatch {
                expected: self.handle.num_rows,
                actual: y.len(),
            });
        }
        Ok(y)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self {
            handle: self.handle.transposed(),
            executor: Arc::clone(&self.executor),
        })
    }
}
