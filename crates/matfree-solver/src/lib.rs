//! Iterative solvers over matrix-free linear operators.
//!
//! This crate provides:
//! - Conjugate gradient for symmetric positive (semi-)definite systems
//! - Jacobi and identity preconditioners
//! - Lanczos iteration for truncated SVD
//! - A conjugate gradient driver for matrices held by an execution substrate
//!
//! All solvers take operators from `matfree-core` and only ever call
//! `times`, `transpose` and `diagonal` on them.

pub mod cg;
pub mod distributed;
pub mod lanczos;
pub mod preconditioner;

pub use cg::{CgConfig, CgResult, ConjugateGradientSolver};
pub use distributed::{
    DistributedConjugateGradientSolver, DistributedRowMatrix, MatVecExecutor, MatrixHandle,
    PartitionedExecutor,
};
pub use lanczos::{LanczosConfig, LanczosSolver, LanczosState, SingularDecomposition};
pub use preconditioner::{IdentityPreconditioner, JacobiPreconditioner, Preconditioner};

pub use matfree_core::{Error, ExecutionError, Result};
