//! Resumable state of a Lanczos iteration.

use std::sync::Arc;

use matfree_core::vector::normalized;
use matfree_core::{DMatrix, DVector, Error, OperatorRef, Result, SquaredOperator};

/// Everything a Lanczos run has produced so far.
///
/// The state owns the corpus it iterates over. An asymmetric corpus `A` is
/// replaced by `AᵗA` at construction, so the iteration always works on a
/// symmetric operator and the reported singular values are those of `A`.
///
/// Basis vectors are populated for indices `0..iteration_number()`; the
/// tridiagonal matrix is `desired_rank x desired_rank` and filled row by row.
/// Singular values and vectors are empty until the state is finalized.
#[derive(Debug, Clone)]
pub struct LanczosState {
    pub(super) corpus: OperatorRef,
    pub(super) is_symmetric: bool,
    pub(super) desired_rank: usize,
    pub(super) scale_factor: f64,
    pub(super) basis: Vec<DVector<f64>>,
    pub(super) tridiagonal: DMatrix<f64>,
    pub(super) closed: bool,
    pub(super) finalized: bool,
    pub(super) singular_values: Vec<f64>,
    pub(super) singular_vectors: Vec<DVector<f64>>,
}

impl LanczosState {
    /// Start a run over `corpus` from `initial_vector`.
    ///
    /// A symmetric corpus must be square. `desired_rank` must lie in
    /// `1..=num_cols` and the initial vector must be a non-zero vector of
    /// length `num_cols`; it is normalized before use.
    pub fn new(
        corpus: OperatorRef,
        is_symmetric: bool,
        desired_rank: usize,
        initial_vector: DVector<f64>,
    ) -> Result<Self> {
        let corpus: OperatorRef = if is_symmetric {
            if !corpus.is_square() {
                return Err(Error::DimensionMismatch {
                    expected: corpus.num_rows(),
                    actual: corpus.num_cols(),
                });
            }
            corpus
        } else {
            Arc::new(SquaredOperator::new(corpus))
        };

        let n = corpus.num_cols();
        if desired_rank == 0 || desired_rank > n {
            return Err(Error::InvalidArgument(format!(
                "desired rank {desired_rank} outside 1..={n}"
            )));
        }
        if initial_vector.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: initial_vector.len(),
            });
        }
        let start = normalized(&initial_vector).ok_or_else(|| {
            Error::InvalidArgument("initial vector must be non-zero and finite".to_string())
        })?;

        Ok(Self {
            corpus,
            is_symmetric,
            desired_rank,
            scale_factor: 0.0,
            basis: vec![start],
            tridiagonal: DMatrix::zeros(desired_rank, desired_rank),
            closed: false,
            finalized: false,
            singular_values: Vec::new(),
            singular_vectors: Vec::new(),
        })
    }

    /// The operator being iterated (`AᵗA` for an asymmetric source).
    pub fn corpus(&self) -> &OperatorRef {
        &self.corpus
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    pub fn desired_rank(&self) -> usize {
        self.desired_rank
    }

    /// Number of basis vectors generated so far.
    pub fn iteration_number(&self) -> usize {
        self.basis.len()
    }

    /// Norm of the corpus applied to the first basis vector, 0 before the
    /// first step.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn basis_vector(&self, i: usize) -> Option<&DVector<f64>> {
        self.basis.get(i)
    }

    pub fn basis(&self) -> &[DVector<f64>] {
        &self.basis
    }

    /// Tridiagonal coefficients of the scaled corpus in the Lanczos basis.
    pub fn tridiagonal(&self) -> &DMatrix<f64> {
        &self.tridiagonal
    }

    /// Whether no further steps will extend the basis, either because the
    /// desired rank was reached or because the Krylov space became invariant.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of rows of the tridiagonal matrix that are complete.
    pub fn completed_rows(&self) -> usize {
        if self.closed {
            self.basis.len()
        } else {
            self.basis.len() - 1
        }
    }

    /// The `i`-th largest singular value, once finalized.
    pub fn singular_value(&self, i: usize) -> Option<f64> {
        self.singular_values.get(i).copied()
    }

    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Right singular vector paired with [`singular_value`](Self::singular_value).
    pub fn right_singular_vector(&self, i: usize) -> Option<&DVector<f64>> {
        self.singular_vectors.get(i)
    }

    pub fn right_singular_vectors(&self) -> &[DVector<f64>] {
        &self.singular_vectors
    }

    /// Largest deviation of the basis Gram matrix from the identity,
    /// `max |v_i·v_j - δ_ij|`.
    pub fn orthogonality_loss(&self) -> f64 {
        let mut loss: f64 = 0.0;
        for (i, vi) in self.basis.iter().enumerate() {
            for (j, vj) in self.basis.iter().enumerate().skip(i) {
                let target = if i == j { 1.0 } else { 0.0 };
                loss = loss.max((vi.dot(vj) - target).abs());
            }
        }
        loss
    }
}
