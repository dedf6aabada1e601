//! Map-only job computing the distance from every input vector to every
//! seed vector.

use matfree_core::{DVector, Error, Result};
use rayon::prelude::*;

use crate::measure::{DistanceMeasure, MeasureKind};

/// An identified vector, as read from an input partition or the seed set.
pub type NamedVector = (String, DVector<f64>);

/// One output record: `distance(seed, other)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTriple {
    pub seed_id: String,
    pub other_id: String,
    pub distance: f64,
}

/// Distances between an in-memory seed set and a partitioned collection.
///
/// Each partition is mapped independently and in parallel; there is no
/// reduce step. Output keeps partition order, then input order, then seed
/// order.
#[derive(Debug)]
pub struct VectorDistanceJob {
    seeds: Vec<NamedVector>,
    measure: Box<dyn DistanceMeasure>,
}

impl VectorDistanceJob {
    /// All seeds must have the same length.
    pub fn new(seeds: Vec<NamedVector>, measure: Box<dyn DistanceMeasure>) -> Result<Self> {
        if let Some((_, first)) = seeds.first() {
            let dim = first.len();
            if let Some((_, bad)) = seeds.iter().find(|(_, v)| v.len() != dim) {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { seeds, measure })
    }

    /// Job using one of the built-in measures.
    pub fn with_kind(seeds: Vec<NamedVector>, kind: MeasureKind) -> Result<Self> {
        Self::new(seeds, kind.measure())
    }

    pub fn seeds(&self) -> &[NamedVector] {
        &self.seeds
    }

    pub fn measure(&self) -> &dyn DistanceMeasure {
        self.measure.as_ref()
    }

    /// Map every partition, returning one output list per partition.
    ///
    /// Fails with `DimensionMismatch` if any input vector differs in length
    /// from the seeds.
    pub fn run(&self, partitions: &[Vec<NamedVector>]) -> Result<Vec<Vec<DistanceTriple>>> {
        log::info!(
            "vector distance: {} seeds, {} partitions, measure {}",
            self.seeds.len(),
            partitions.len(),
            self.measure.name()
        );
        partitions
            .par_iter()
            .enumerate()
            .map(|(index, partition)| self.map_partition(index, partition))
            .collect()
    }

    /// [`run`](Self::run), concatenated into a single list.
    pub fn run_flat(&self, partitions: &[Vec<NamedVector>]) -> Result<Vec<DistanceTriple>> {
        Ok(self.run(partitions)?.into_iter().flatten().collect())
    }

    fn map_partition(&self, index: usize, partition: &[NamedVector]) -> Result<Vec<DistanceTriple>> {
        let mut out = Vec::with_capacity(partition.len() * self.seeds.len());
        for (other_id, vector) in partition {
            for (seed_id, seed) in &self.seeds {
                if seed.len() != vector.len() {
                    return Err(Error::DimensionMismatch {
                        expected: seed.len(),
                        actual: vector.len(),
                    });
                }
                out.push(DistanceTriple {
                    seed_id: seed_id.clone(),
                    other_id: other_id.clone(),
                    distance: self.measure.distance(seed, vector),
                });
            }
        }
        log::debug!(
            "vector distance: partition {} produced {} records",
            index,
            out.len()
        );
        Ok(out)
    }
}
