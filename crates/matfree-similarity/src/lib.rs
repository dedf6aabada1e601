//! Pairwise distances between a seed set and a partitioned vector collection.
//!
//! The seed set is small and held in memory; the collection is split into
//! partitions that are mapped independently. There is no reduce step, so the
//! output is one list of [`DistanceTriple`]s per input partition.

pub mod job;
pub mod measure;

pub use job::{DistanceTriple, NamedVector, VectorDistanceJob};
pub use measure::{Cosine, DistanceMeasure, Euclidean, Manhattan, MeasureKind, SquaredEuclidean};
