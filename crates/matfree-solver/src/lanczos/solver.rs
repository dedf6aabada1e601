//! The Lanczos iteration and its finalization into Ritz pairs.

use matfree_core::{DVector, Error, OperatorRef, Result};
use nalgebra::SymmetricEigen;

use super::LanczosConfig;
use super::state::LanczosState;

/// Leading singular triplets recovered by [`LanczosSolver::decompose`].
#[derive(Debug, Clone)]
pub struct SingularDecomposition {
    /// Singular values, largest first.
    pub values: Vec<f64>,
    /// Unit right singular vectors, paired with `values`.
    pub vectors: Vec<DVector<f64>>,
}

/// Drives a [`LanczosState`]: one step at a time, to completion, and finally
/// to singular values and vectors.
#[derive(Debug, Clone, Default)]
pub struct LanczosSolver {
    config: LanczosConfig,
}

impl LanczosSolver {
    pub fn new(config: LanczosConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LanczosConfig {
        &self.config
    }

    /// Run one Lanczos step on the newest basis vector.
    ///
    /// Fills row `i` of the tridiagonal matrix and, unless the state closes,
    /// appends basis vector `i + 1`. Returns whether the state is still open.
    /// Stepping a closed state does nothing.
    pub fn step(&self, state: &mut LanczosState) -> Result<bool> {
        if state.finalized {
            return Err(Error::InvalidArgument(
                "cannot step a finalized Lanczos state".to_string(),
            ));
        }
        if state.closed {
            return Ok(false);
        }

        let i = state.basis.len() - 1;
        let mut w = state.corpus.times(&state.basis[i])?;
        if i == 0 {
            let norm = w.norm();
            state.scale_factor = if norm > 0.0 && norm.is_finite() {
                norm
            } else {
                1.0
            };
        }
        w /= state.scale_factor;

        let alpha = state.basis[i].dot(&w);

        // full re-orthogonalization, twice
        for _ in 0..2 {
            for v in &state.basis {
                let projection = v.dot(&w);
                w.axpy(-projection, v, 1.0);
            }
        }
        let beta = w.norm();

        state.tridiagonal[(i, i)] = alpha;
        log::trace!("Lanczos: step {}: alpha = {:.6e}, beta = {:.6e}", i, alpha, beta);

        if i + 1 == state.desired_rank {
            state.closed = true;
            return Ok(false);
        }
        if !(beta > self.config.breakdown_tolerance) {
            log::warn!(
                "Lanczos: invariant subspace after {} basis vectors (beta = {:.2e}), stopping below rank {}",
                i + 1,
                beta,
                state.desired_rank
            );
            state.closed = true;
            return Ok(false);
        }

        state.tridiagonal[(i, i + 1)] = beta;
        state.tridiagonal[(i + 1, i)] = beta;
        state.basis.push(w / beta);
        Ok(true)
    }

    /// Step until the state closes, then finalize it.
    pub fn solve(&self, state: &mut LanczosState) -> Result<()> {
        while self.step(state)? {}
        self.finalize(state)
    }

    /// Diagonalize the completed part of the tridiagonal matrix and store
    /// singular values (largest first) with their right singular vectors.
    pub fn finalize(&self, state: &mut LanczosState) -> Result<()> {
        if state.finalized {
            return Err(Error::InvalidArgument(
                "Lanczos state is already finalized".to_string(),
            ));
        }
        let k = state.completed_rows();
        if k == 0 {
            return Err(Error::InvalidArgument(
                "Lanczos state has no completed steps to finalize".to_string(),
            ));
        }

        let block = state.tridiagonal.view((0, 0), (k, k)).into_owned();
        let eigen = SymmetricEigen::new(block);

        let mut order: Vec<usize> = (0..k).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

        let n = state.corpus.num_cols();
        let mut values = Vec::with_capacity(k);
        let mut vectors = Vec::with_capacity(k);
        for r in order {
            let lambda = eigen.eigenvalues[r] * state.scale_factor;
            if !lambda.is_finite() {
                return Err(Error::Decomposition(format!(
                    "non-finite Ritz value {lambda}"
                )));
            }
            let value = if state.is_symmetric {
                lambda
            } else {
                lambda.max(0.0).sqrt()
            };

            let mut vector = DVector::zeros(n);
            for (j, basis) in state.basis.iter().take(k).enumerate() {
                vector.axpy(eigen.eigenvectors[(j, r)], basis, 1.0);
            }
            let norm = vector.norm();
            if !(norm > 0.0 && norm.is_finite()) {
                return Err(Error::Decomposition(format!(
                    "degenerate Ritz vector for value {value}"
                )));
            }
            vector /= norm;

            values.push(value);
            vectors.push(vector);
        }

        log::debug!(
            "Lanczos: finalized {} Ritz pairs (scale {:.3e}, largest {:.6e})",
            k,
            state.scale_factor,
            values[0]
        );

        state.singular_values = values;
        state.singular_vectors = vectors;
        state.finalized = true;
        Ok(())
    }

    /// Leading `rank` singular triplets of `corpus`, starting from the
    /// uniform unit vector.
    pub fn decompose(
        &self,
        corpus: OperatorRef,
        is_symmetric: bool,
        rank: usize,
    ) -> Result<SingularDecomposition> {
        let n = corpus.num_cols();
        let start = DVector::from_element(n, 1.0 / (n.max(1) as f64).sqrt());
        let mut state = LanczosState::new(corpus, is_symmetric, rank, start)?;
        self.solve(&mut state)?;
        Ok(SingularDecomposition {
            values: state.singular_values,
            vectors: state.singular_vectors,
        })
    }
}
