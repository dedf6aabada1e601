//! Conjugate gradient driven through a distributed matrix.

use matfree_core::{DVector, LinearOperator, Result};

use super::DistributedRowMatrix;
use crate::cg::{CgConfig, CgResult, ConjugateGradientSolver};

/// Runs the ordinary conjugate gradient loop with every `A p` delegated to a
/// [`DistributedRowMatrix`].
///
/// Only the matrix-vector products leave the process; vectors and the
/// iteration stay local. Executor failures end the solve with
/// `Error::Execution`.
#[derive(Debug, Clone, Default)]
pub struct DistributedConjugateGradientSolver {
    solver: ConjugateGradientSolver,
}

impl DistributedConjugateGradientSolver {
    pub fn new(config: CgConfig) -> Self {
        Self {
            solver: ConjugateGradientSolver::new(config),
        }
    }

    pub fn config(&self) -> &CgConfig {
        self.solver.config()
    }

    /// Solve `A x = b` for a distributed symmetric `A`.
    pub fn solve(&self, matrix: &DistributedRowMatrix, b: &DVector<f64>) -> Result<CgResult> {
        log::info!("Distributed CG: solving against {}", matrix.handle());
        self.solver.solve(matrix, b)
    }

    /// Solve with an operator built on distributed matrices, such as
    /// `AᵗA` or a ridge-shifted matrix.
    pub fn solve_operator(&self, op: &dyn LinearOperator, b: &DVector<f64>) -> Result<CgResult> {
        log::info!(
            "Distributed CG: solving against a {}x{} composite operator",
            op.num_rows(),
            op.num_cols()
        );
        self.solver.solve(op, b)
    }
}
