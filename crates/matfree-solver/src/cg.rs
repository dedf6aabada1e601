//! Conjugate gradient solver for symmetric positive (semi-)definite systems.
//!
//! Solves `A x = b` using nothing but `A.times(p)`, optionally with a
//! [`Preconditioner`] applied to each residual. Every call returns a fresh
//! [`CgResult`]; the solver keeps no state between solves.
//!
//! # Usage
//!
//! ```ignore
//! use matfree_solver::{CgConfig, ConjugateGradientSolver, JacobiPreconditioner};
//!
//! let solver = ConjugateGradientSolver::new(CgConfig::default().with_max_iterations(100));
//! let result = solver.solve(&a, &b)?;
//!
//! let jacobi = JacobiPreconditioner::from_operator(&a)?;
//! let result = solver.solve_preconditioned(&a, &b, &jacobi)?;
//! ```

use matfree_core::matrix::is_symmetric;
use matfree_core::{DVector, Error, LinearOperator, Result};

use crate::preconditioner::Preconditioner;

/// Default relative residual at which the iteration stops.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Relative tolerance of the dense symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Conjugate gradient configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CgConfig {
    /// Maximum number of iterations. `None` means `b.len() + 2`.
    pub max_iterations: Option<usize>,
    /// Convergence tolerance on `||r|| / ||b||`.
    pub tolerance: f64,
    /// Reject operators with a dense form that is not symmetric.
    pub check_symmetry: bool,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            tolerance: DEFAULT_TOLERANCE,
            check_symmetry: false,
        }
    }
}

impl CgConfig {
    /// Set the iteration limit.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the relative residual tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable the dense symmetry check.
    pub fn with_symmetry_check(mut self, check: bool) -> Self {
        self.check_symmetry = check;
        self
    }

    /// Iteration limit for a right-hand side of length `n`.
    pub fn iteration_limit(&self, n: usize) -> usize {
        self.max_iterations.unwrap_or(n + 2)
    }

    fn validate(&self) -> Result<()> {
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidArgument(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.tolerance >= 0.0) {
            return Err(Error::InvalidArgument(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Result of a conjugate gradient solve.
#[derive(Debug, Clone)]
pub struct CgResult {
    /// Solution vector.
    pub x: DVector<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Final residual norm `||b - A x||`.
    pub residual_norm: f64,
    /// Final relative residual `||b - A x|| / ||b||`.
    pub relative_residual: f64,
    /// Whether the relative residual dropped below the tolerance.
    pub converged: bool,
}

/// Conjugate gradient solver.
#[derive(Debug, Clone, Default)]
pub struct ConjugateGradientSolver {
    config: CgConfig,
}

impl ConjugateGradientSolver {
    pub fn new(config: CgConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CgConfig {
        &self.config
    }

    /// Solve `A x = b` without preconditioning.
    pub fn solve(&self, a: &dyn LinearOperator, b: &DVector<f64>) -> Result<CgResult> {
        self.run(a, b, None)
    }

    /// Solve `A x = b`, applying `preconditioner` to every residual.
    pub fn solve_preconditioned(
        &self,
        a: &dyn LinearOperator,
        b: &DVector<f64>,
        preconditioner: &dyn Preconditioner,
    ) -> Result<CgResult> {
        self.run(a, b, Some(preconditioner))
    }

    fn check_inputs(
        &self,
        a: &dyn LinearOperator,
        b: &DVector<f64>,
        preconditioner: Option<&dyn Preconditioner>,
    ) -> Result<()> {
        if !a.is_square() {
            return Err(Error::NotSymmetric(format!(
                "conjugate gradient needs a square operator, got {}x{}",
                a.num_rows(),
                a.num_cols()
            )));
        }
        if b.len() != a.num_cols() {
            return Err(Error::DimensionMismatch {
                expected: a.num_cols(),
                actual: b.len(),
            });
        }
        if let Some(m) = preconditioner {
            if m.dim() != b.len() {
                return Err(Error::DimensionMismatch {
                    expected: b.len(),
                    actual: m.dim(),
                });
            }
        }
        self.config.validate()?;
        if self.config.check_symmetry {
            if let Some(dense) = a.as_dense() {
                if !is_symmetric(dense, SYMMETRY_TOLERANCE) {
                    return Err(Error::NotSymmetric(
                        "dense operator differs from its transpose".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn run(
        &self,
        a: &dyn LinearOperator,
        b: &DVector<f64>,
        preconditioner: Option<&dyn Preconditioner>,
    ) -> Result<CgResult> {
        self.check_inputs(a, b, preconditioner)?;

        let n = b.len();
        let max_iterations = self.config.iteration_limit(n);
        let tolerance = self.config.tolerance;

        let b_norm = b.norm();
        if b_norm == 0.0 {
            return Ok(CgResult {
                x: DVector::zeros(n),
                iterations: 0,
                residual_norm: 0.0,
                relative_residual: 0.0,
                converged: true,
            });
        }

        log::info!(
            "CG: solving {}x{} system (max {} iterations, tolerance {:.1e}, {})",
            n,
            n,
            max_iterations,
            tolerance,
            if preconditioner.is_some() {
                "preconditioned"
            } else {
                "unpreconditioned"
            }
        );

        let precondition = |r: &DVector<f64>| match preconditioner {
            Some(m) => m.apply(r),
            None => r.clone(),
        };

        let mut x = DVector::zeros(n);
        let mut r = b.clone();
        let mut z = precondition(&r);
        let mut p = z.clone();
        let mut rz = r.dot(&z);
        let mut residual_norm = b_norm;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations {
            let ap = a.times(&p)?;
            let p_ap = p.dot(&ap);
            // p·Ap < 0 is fine on indefinite systems, only a zero or
            // non-finite curvature leaves alpha undefined
            if p_ap == 0.0 || !p_ap.is_finite() {
                log::warn!(
                    "CG: breakdown at iteration {} (p·Ap = {:.2e})",
                    iterations,
                    p_ap
                );
                break;
            }

            let alpha = rz / p_ap;
            x.axpy(alpha, &p, 1.0);
            r.axpy(-alpha, &ap, 1.0);
            iterations += 1;

            residual_norm = r.norm();
            log::debug!(
                "CG: iteration {}: residual {:.3e} (relative {:.3e})",
                iterations,
                residual_norm,
                residual_norm / b_norm
            );

            if residual_norm / b_norm < tolerance {
                converged = true;
                break;
            }

            z = precondition(&r);
            let rz_next = r.dot(&z);
            if rz == 0.0 || !rz_next.is_finite() {
                log::warn!(
                    "CG: breakdown at iteration {} (r·z = {:.2e})",
                    iterations,
                    rz_next
                );
                break;
            }
            let beta = rz_next / rz;
            p.axpy(1.0, &z, beta);
            rz = rz_next;
        }

        let relative_residual = residual_norm / b_norm;
        if converged {
            log::info!(
                "CG: converged after {} iterations (residual: {:.2e})",
                iterations,
                relative_residual
            );
        } else {
            log::warn!(
                "CG: did not converge after {} iterations (residual: {:.2e})",
                iterations,
                relative_residual
            );
        }

        Ok(CgResult {
            x,
            iterations,
            residual_norm,
            relative_residual,
            converged,
        })
    }
}
