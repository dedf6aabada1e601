//! Distance measures between equal-length vectors.

use std::fmt;
use std::str::FromStr;

use matfree_core::{DVector, Error};

/// A distance between two vectors of the same length.
///
/// Callers check lengths before calling `distance`.
pub trait DistanceMeasure: Send + Sync + fmt::Debug {
    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// `Σ (a_i - b_i)²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclidean;

impl DistanceMeasure for SquaredEuclidean {
    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        (a - b).norm_squared()
    }

    fn name(&self) -> &'static str {
        "squared-euclidean"
    }
}

/// `sqrt(Σ (a_i - b_i)²)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMeasure for Euclidean {
    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        (a - b).norm()
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// `Σ |a_i - b_i|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl DistanceMeasure for Manhattan {
    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        (a - b).lp_norm(1)
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// `1 - a·b / (|a| |b|)`, in `[0, 2]`.
///
/// Two zero vectors are at distance 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl DistanceMeasure for Cosine {
    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        let dot = a.dot(b);
        // rounding can push |dot| above the norm product
        let denominator = (a.norm() * b.norm()).max(dot.abs());
        if denominator == 0.0 {
            return 0.0;
        }
        1.0 - dot / denominator
    }

    fn name(&self) -> &'static str {
        "cosine"
    }
}

/// Selects one of the built-in measures, e.g. from a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureKind {
    #[default]
    SquaredEuclidean,
    Euclidean,
    Manhattan,
    Cosine,
}

impl MeasureKind {
    pub fn measure(self) -> Box<dyn DistanceMeasure> {
        match self {
            Self::SquaredEuclidean => Box::new(SquaredEuclidean),
            Self::Euclidean => Box::new(Euclidean),
            Self::Manhattan => Box::new(Manhattan),
            Self::Cosine => Box::new(Cosine),
        }
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.measure().name())
    }
}

impl FromStr for MeasureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "squared-euclidean" | "sqeuclidean" => Ok(Self::SquaredEuclidean),
            "euclidean" => Ok(Self::Euclidean),
            "manhattan" | "cityblock" => Ok(Self::Manhattan),
            "cosine" => Ok(Self::Cosine),
            _ => Err(Error::InvalidArgument(format!("unknown distance measure: {s}"))),
        }
    }
}
