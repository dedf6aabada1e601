//! Small helpers over `nalgebra::DVector<f64>`, the dense vector type used
//! throughout the workspace.

use nalgebra::DVector;

use crate::error::{Result, check_dimension};

/// Vector of `n` ones.
pub fn ones(n: usize) -> DVector<f64> {
    DVector::from_element(n, 1.0)
}

/// Squared Euclidean distance between two vectors of equal size.
pub fn distance_squared(a: &DVector<f64>, b: &DVector<f64>) -> Result<f64> {
    check_dimension(a.len(), b.len())?;
    Ok((a - b).norm_squared())
}

/// Euclidean distance between two vectors of equal size.
pub fn distance(a: &DVector<f64>, b: &DVector<f64>) -> Result<f64> {
    distance_squared(a, b).map(f64::sqrt)
}

/// Normalize to unit length, returning `None` for a zero or non-finite vector.
pub fn normalized(v: &DVector<f64>) -> Option<DVector<f64>> {
    let norm = v.norm();
    if norm > 0.0 && norm.is_finite() {
        Some(v / norm)
    } else {
        None
    }
}
