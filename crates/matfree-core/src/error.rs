//! Error types for operator construction, application and solving.

use thiserror::Error;

/// Errors raised by operators and the solvers built on them.
#[derive(Debug, Error)]
pub enum Error {
    /// Operand sizes are incompatible.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A symmetric operator was required but the supplied one is not.
    #[error("Operator is not symmetric: {0}")]
    NotSymmetric(String),

    /// An argument or configuration value is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The distributed matrix-vector multiply failed.
    #[error("Distributed execution failed: {0}")]
    Execution(#[from] ExecutionError),

    /// A dense eigen-decomposition produced unusable values.
    #[error("Decomposition failed: {0}")]
    Decomposition(String),
}

/// Failures reported by an external matrix-vector execution substrate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// No matrix is registered under the given handle.
    #[error("Matrix not found: {0}")]
    MatrixNotFound(String),

    /// One partition of the multiply failed.
    #[error("Partition {partition} failed: {reason}")]
    PartitionFailed { partition: usize, reason: String },

    /// Backend-specific failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for operator and solver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fail with [`Error::DimensionMismatch`] unless `actual == expected`.
#[inline]
pub fn check_dimension(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, actual })
    }
}
