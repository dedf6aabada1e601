//! Preconditioners for the conjugate gradient solver.
//!
//! A preconditioner `M` approximates `A^(-1)`. Conjugate gradient applies it
//! to every residual, which shrinks the iteration count when `A` is badly
//! scaled.

use matfree_core::{DVector, Error, LinearOperator, Result};

/// Diagonal entries below this magnitude are treated as 1.
const ZERO_DIAGONAL: f64 = 1e-30;

/// A preconditioner for real-valued symmetric systems.
pub trait Preconditioner: Send + Sync {
    /// Apply the preconditioner: `M^(-1) * r`.
    fn apply(&self, r: &DVector<f64>) -> DVector<f64>;

    /// Dimension of the preconditioner.
    fn dim(&self) -> usize;
}

// ============================================================================
// Jacobi (Diagonal) Preconditioner
// ============================================================================

/// Jacobi (diagonal) preconditioner.
///
/// Uses `M = diag(A)`, so `M^(-1) * r = r / diag(A)`. Effective on systems
/// whose rows are scaled very differently.
///
/// Zero or near-zero diagonal entries are replaced with 1.0.
#[derive(Debug, Clone)]
pub struct JacobiPreconditioner {
    inv_diag: DVector<f64>,
}

impl JacobiPreconditioner {
    /// Create from the diagonal reported by `op`.
    ///
    /// Fails with `InvalidArgument` when `op` cannot report its diagonal
    /// and with `DimensionMismatch` when it is not square.
    pub fn from_operator(op: &dyn LinearOperator) -> Result<Self> {
        if !op.is_square() {
            return Err(Error::DimensionMismatch {
                expected: op.num_rows(),
                actual: op.num_cols(),
            });
        }
        let diag = op.diagonal().ok_or_else(|| {
            Error::InvalidArgument(
                "Jacobi preconditioning needs an operator that exposes its diagonal".to_string(),
            )
        })?;
        Ok(Self::from_diagonal(&diag))
    }

    /// Create from a diagonal vector.
    pub fn from_diagonal(diag: &DVector<f64>) -> Self {
        let inv_diag = diag.map(|d| if d.abs() < ZERO_DIAGONAL { 1.0 } else { 1.0 / d });
        Self { inv_diag }
    }
}

impl Preconditioner for JacobiPreconditioner {
    fn apply(&self, r: &DVector<f64>) -> DVector<f64> {
        r.component_mul(&self.inv_diag)
    }

    fn dim(&self) -> usize {
        self.inv_diag.len()
    }
}

// ============================================================================
// Identity Preconditioner (no preconditioning)
// ============================================================================

/// Identity preconditioner (no-op).
///
/// Useful as a baseline: CG with it takes the same steps as plain CG.
#[derive(Debug, Clone, Copy)]
pub struct IdentityPreconditioner {
    size: usize,
}

impl IdentityPreconditioner {
    /// Create an identity preconditioner of the given size.
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Preconditioner for IdentityPreconditioner {
    fn apply(&self, r: &DVector<f64>) -> DVector<f64> {
        r.clone()
    }

    fn dim(&self) -> usize {
        self.size
    }
}
