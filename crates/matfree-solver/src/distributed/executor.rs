//! In-process execution substrate holding row-partitioned dense blocks.

use indexmap::IndexMap;
use matfree_core::{DMatrix, DVector, Error, ExecutionError, Result};
use rayon::prelude::*;

use super::{MatVecExecutor, MatrixHandle};

/// Multiplies registered matrices block by block on the rayon thread pool.
///
/// Each matrix is stored as a list of row blocks. `A v` multiplies every
/// block in parallel and concatenates the pieces in partition order;
/// `Aᵗ v` sums the per-block products `Bᵢᵗ vᵢ` in partition order, so both
/// are deterministic.
#[derive(Debug, Default, Clone)]
pub struct PartitionedExecutor {
    matrices: IndexMap<String, Vec<DMatrix<f64>>>,
}

impl PartitionedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `matrix` into `partitions` contiguous row blocks and register it.
    ///
    /// Re-registering a name replaces the stored matrix.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        matrix: &DMatrix<f64>,
        partitions: usize,
    ) -> Result<MatrixHandle> {
        if partitions == 0 {
            return Err(Error::InvalidArgument(
                "a matrix needs at least one partition".to_string(),
            ));
        }
        let rows = matrix.nrows();
        let block_rows = rows.div_ceil(partitions).max(1);
        let blocks = (0..rows)
            .step_by(block_rows)
            .map(|start| matrix.rows(start, block_rows.min(rows - start)).into_owned())
            .collect();
        self.register_partitions(name, blocks)
    }

    /// Register a matrix given as row blocks, top to bottom.
    pub fn register_partitions(
        &mut self,
        name: impl Into<String>,
        blocks: Vec<DMatrix<f64>>,
    ) -> Result<MatrixHandle> {
        let name = name.into();
        let Some(first) = blocks.first() else {
            return Err(Error::InvalidArgument(format!(
                "matrix {name} has no partitions"
            )));
        };
        let cols = first.ncols();
        if let Some(bad) = blocks.iter().find(|b| b.ncols() != cols) {
            return Err(Error::DimensionMismatch {
                expected: cols,
                actual: bad.ncols(),
            });
        }
        let rows = blocks.iter().map(|b| b.nrows()).sum();

        log::debug!(
            "registered {} ({}x{}) in {} partitions",
            name,
            rows,
            cols,
            blocks.len()
        );
        let handle = MatrixHandle::new(name.clone(), rows, cols);
        self.matrices.insert(name, blocks);
        Ok(handle)
    }

    /// Handle to a registered matrix.
    pub fn handle(&self, name: &str) -> Option<MatrixHandle> {
        let blocks = self.matrices.get(name)?;
        let rows = blocks.iter().map(|b| b.nrows()).sum();
        let cols = blocks.first().map_or(0, |b| b.ncols());
        Some(MatrixHandle::new(name, rows, cols))
    }

    /// Number of partitions of a registered matrix.
    pub fn partition_count(&self, name: &str) -> Option<usize> {
        self.matrices.get(name).map(Vec::len)
    }

    /// Registered matrix names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matrices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

fn multiply_rows(
    blocks: &[DMatrix<f64>],
    v: &DVector<f64>,
) -> std::result::Result<DVector<f64>, ExecutionError> {
    let pieces = blocks
        .par_iter()
        .enumerate()
        .map(|(partition, block)| {
            if block.ncols() != v.len() {
                return Err(ExecutionError::PartitionFailed {
                    partition,
                    reason: format!("expected {} inputs, got {}", block.ncols(), v.len()),
                });
            }
            log::trace!("partition {}: {} rows", partition, block.nrows());
            Ok(block * v)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let rows = pieces.iter().map(|p| p.len()).sum();
    Ok(DVector::from_iterator(
        rows,
        pieces.iter().flat_map(|p| p.iter().copied()),
    ))
}

fn multiply_transposed(
    blocks: &[DMatrix<f64>],
    v: &DVector<f64>,
) -> std::result::Result<DVector<f64>, ExecutionError> {
    let rows: usize = blocks.iter().map(|b| b.nrows()).sum();
    if rows != v.len() {
        return Err(ExecutionError::Backend(format!(
            "transposed multiply expected {} inputs, got {}",
            rows,
            v.len()
        )));
    }
    let cols = blocks.first().map_or(0, |b| b.ncols());

    let offsets: Vec<usize> = blocks
        .iter()
        .scan(0, |offset, b| {
            let start = *offset;
            *offset += b.nrows();
            Some(start)
        })
        .collect();

    let pieces: Vec<DVector<f64>> = blocks
        .par_iter()
        .zip(offsets.par_iter())
        .enumerate()
        .map(|(partition, (block, &offset))| {
            log::trace!("partition {}: {} rows (transposed)", partition, block.nrows());
            block.tr_mul(&v.rows(offset, block.nrows()))
        })
        .collect();

    Ok(pieces
        .into_iter()
        .fold(DVector::zeros(cols), |acc, piece| acc + piece))
}

impl MatVecExecutor for PartitionedExecutor {
    fn multiply(
        &self,
        handle: &MatrixHandle,
        v: &DVector<f64>,
    ) -> std::result::Result<DVector<f64>, ExecutionError> {
        let blocks = self
            .matrices
            .get(&handle.name)
            .ok_or_else(|| ExecutionError::MatrixNotFound(handle.name.clone()))?;

        if handle.transposed {
            multiply_transposed(blocks, v)
        } else {
            multiply_rows(blocks, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DMatrix<f64> {
        DMatrix::from_fn(5, 3, |i, j| (i * 3 + j) as f64 - 4.0)
    }

    #[test]
    fn register_splits_rows() {
        let mut executor = PartitionedExecutor::new();
        let handle = executor.register("a", &sample(), 2).unwrap();
        assert_eq!(handle, MatrixHandle::new("a", 5, 3));
        assert_eq!(executor.partition_count("a"), Some(2));
        assert_eq!(executor.handle("a"), Some(handle));
        assert_eq!(executor.len(), 1);
    }

    #[test]
    fn more_partitions_than_rows() {
        let mut executor = PartitionedExecutor::new();
        executor.register("a", &sample(), 8).unwrap();
        assert_eq!(executor.partition_count("a"), Some(5));
    }

    #[test]
    fn register_rejects_bad_partitions() {
        let mut executor = PartitionedExecutor::new();
        assert!(executor.register("a", &sample(), 0).is_err());
        assert!(executor.register_partitions("b", Vec::new()).is_err());
        assert!(matches!(
            executor.register_partitions("c", vec![DMatrix::zeros(2, 3), DMatrix::zeros(2, 4)]),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 4
            })
        ));
        assert!(executor.is_empty());
    }

    #[test]
    fn multiply_matches_dense() {
        let m = sample();
        let mut executor = PartitionedExecutor::new();
        let handle = executor.register("a", &m, 3).unwrap();

        let v = DVector::from_vec(vec![1.0, -2.0, 0.5]);
        let y = executor.multiply(&handle, &v).unwrap();
        assert!((y - &m * &v).norm() < 1e-12);

        let u = DVector::from_vec(vec![1.0, 0.0, -1.0, 2.0, 0.5]);
        let z = executor.multiply(&handle.transposed(), &u).unwrap();
        assert!((z - m.tr_mul(&u)).norm() < 1e-12);
    }

    #[test]
    fn unknown_matrix_is_reported() {
        let executor = PartitionedExecutor::new();
        let err = executor
            .multiply(&MatrixHandle::new("nope", 1, 1), &DVector::zeros(1))
            .unwrap_err();
        assert_eq!(err, ExecutionError::MatrixNotFound("nope".to_string()));
    }

    #[test]
    fn wrong_input_length_fails_partition() {
        let mut executor = PartitionedExecutor::new();
        let handle = executor.register("a", &sample(), 2).unwrap();
        assert!(matches!(
            executor.multiply(&handle, &DVector::zeros(2)),
            Err(ExecutionError::PartitionFailed { .. })
        ));
        assert!(matches!(
            executor.multiply(&handle.transposed(), &DVector::zeros(2)),
            Err(ExecutionError::Backend(_))
        ));
    }

    #[test]
    fn names_keep_registration_order() {
        let mut executor = PartitionedExecutor::new();
        executor.register("z", &sample(), 1).unwrap();
        executor.register("a", &sample(), 1).unwrap();
        assert_eq!(executor.names().collect::<Vec<_>>(), vec!["z", "a"]);
    }
}
