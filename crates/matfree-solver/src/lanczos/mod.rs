//! Lanczos iteration for truncated singular value decomposition.
//!
//! The iteration builds an orthonormal Krylov basis of a symmetric corpus and
//! the tridiagonal matrix of the corpus in that basis. Diagonalizing that
//! small matrix yields Ritz values and vectors that approximate the extreme
//! eigenpairs of the corpus. For an asymmetric matrix `A` the corpus is
//! `AᵗA`, whose eigenvalues are the squared singular values of `A`.
//!
//! The corpus is only touched through `times`, so the same code runs over
//! dense, sparse, offset-corrected and distributed operators.
//!
//! # Usage
//!
//! ```ignore
//! use matfree_solver::{LanczosSolver, LanczosState};
//!
//! let mut state = LanczosState::new(corpus, false, 10, start)?;
//! let solver = LanczosSolver::default();
//! solver.solve(&mut state)?;
//! let sigma_max = state.singular_value(0);
//! ```
//!
//! # Module Structure
//!
//! - [`state`] - Resumable [`LanczosState`]
//! - [`solver`] - Stepping and finalization ([`LanczosSolver`])

pub mod solver;
pub mod state;

pub use solver::{LanczosSolver, SingularDecomposition};
pub use state::LanczosState;

/// Default `beta` below which the Krylov space is considered invariant.
pub const DEFAULT_BREAKDOWN_TOLERANCE: f64 = 1e-10;

/// Lanczos solver configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LanczosConfig {
    /// Norm of the re-orthogonalized residual below which the iteration
    /// stops early.
    pub breakdown_tolerance: f64,
}

impl Default for LanczosConfig {
    fn default() -> Self {
        Self {
            breakdown_tolerance: DEFAULT_BREAKDOWN_TOLERANCE,
        }
    }
}

impl LanczosConfig {
    pub fn with_breakdown_tolerance(mut self, tolerance: f64) -> Self {
        self.breakdown_tolerance = tolerance;
        self
    }
}
