//! Operators defined by their action rather than by storage.

use std::fmt;
use std::sync::Arc;

use nalgebra::DVector;

use crate::error::{Result, check_dimension};
use crate::operator::{LinearOperator, OperatorRef, check_input};

type MatVec = Arc<dyn Fn(&DVector<f64>) -> DVector<f64> + Send + Sync>;

/// A linear operator given as a pair of closures: the forward action `A v`
/// and the adjoint action `Aᵗ v`.
///
/// The closures must be linear and deterministic; they are trusted, only the
/// length of their output is checked.
#[derive(Clone)]
pub struct FnOperator {
    rows: usize,
    cols: usize,
    forward: MatVec,
    adjoint: MatVec,
}

impl FnOperator {
    /// Build an operator of shape `rows x cols`.
    pub fn new<F, G>(rows: usize, cols: usize, forward: F, adjoint: G) -> Self
    where
        F: Fn(&DVector<f64>) -> DVector<f64> + Send + Sync + 'static,
        G: Fn(&DVector<f64>) -> DVector<f64> + Send + Sync + 'static,
    {
        Self {
            rows,
            cols,
            forward: Arc::new(forward),
            adjoint: Arc::new(adjoint),
        }
    }

    /// Build a square operator that is its own transpose.
    pub fn symmetric<F>(n: usize, action: F) -> Self
    where
        F: Fn(&DVector<f64>) -> DVector<f64> + Send + Sync + 'static,
    {
        let action: MatVec = Arc::new(action);
        Self {
            rows: n,
            cols: n,
            forward: Arc::clone(&action),
            adjoint: action,
        }
    }
}

impl fmt::Debug for FnOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperator")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

impl LinearOperator for FnOperator {
    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_cols(&self) -> usize {
        self.cols
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        let y = (self.forward)(v);
        check_dimension(self.rows, y.len())?;
        Ok(y)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self {
            rows: self.cols,
            cols: self.rows,
            forward: Arc::clone(&self.adjoint),
            adjoint: Arc::clone(&self.forward),
        })
    }
}
