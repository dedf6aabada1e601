//! Composite operators built from other operators.
//!
//! Each composite owns its operands and checks their compatibility once, in
//! its constructor. Transposes are structural: `(A + B)ᵗ = Aᵗ + Bᵗ`,
//! `(AB)ᵗ = BᵗAᵗ`, `(cA)ᵗ = cAᵗ`, `(AᵗA)ᵗ = AᵗA`.

use std::sync::Arc;

use nalgebra::DVector;

use crate::error::{Result, check_dimension};
use crate::operator::{LinearOperator, OperatorRef, check_input};

/// `A + B`.
#[derive(Debug, Clone)]
pub struct SumOperator {
    a: OperatorRef,
    b: OperatorRef,
}

impl SumOperator {
    /// Fails unless `A` and `B` have the same shape.
    pub fn new(a: OperatorRef, b: OperatorRef) -> Result<Self> {
        check_dimension(a.num_rows(), b.num_rows())?;
        check_dimension(a.num_cols(), b.num_cols())?;
        Ok(Self { a, b })
    }

    pub fn operands(&self) -> (&OperatorRef, &OperatorRef) {
        (&self.a, &self.b)
    }
}

impl LinearOperator for SumOperator {
    fn num_rows(&self) -> usize {
        self.a.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.a.num_cols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        let mut y = self.a.times(v)?;
        y += self.b.times(v)?;
        Ok(y)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self {
            a: self.a.transpose(),
            b: self.b.transpose(),
        })
    }

    fn diagonal(&self) -> Option<DVector<f64>> {
        let da = self.a.diagonal()?;
        let db = self.b.diagonal()?;
        Some(da + db)
    }
}

/// `A B`, applied right to left.
#[derive(Debug, Clone)]
pub struct ProductOperator {
    a: OperatorRef,
    b: OperatorRef,
}

impl ProductOperator {
    /// Fails unless `A.num_cols() == B.num_rows()`.
    pub fn new(a: OperatorRef, b: OperatorRef) -> Result<Self> {
        check_dimension(a.num_cols(), b.num_rows())?;
        Ok(Self { a, b })
    }

    pub fn operands(&self) -> (&OperatorRef, &OperatorRef) {
        (&self.a, &self.b)
    }
}

impl LinearOperator for ProductOperator {
    fn num_rows(&self) -> usize {
        self.a.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.b.num_cols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        self.a.times(&self.b.times(v)?)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self {
            a: self.b.transpose(),
            b: self.a.transpose(),
        })
    }
}

/// `c A`.
#[derive(Debug, Clone)]
pub struct ScaledOperator {
    inner: OperatorRef,
    factor: f64,
}

impl ScaledOperator {
    pub fn new(inner: OperatorRef, factor: f64) -> Self {
        Self { inner, factor }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl LinearOperator for ScaledOperator {
    fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.inner.num_cols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        Ok(self.inner.times(v)? * self.factor)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(Self {
            inner: self.inner.transpose(),
            factor: self.factor,
        })
    }

    fn diagonal(&self) -> Option<DVector<f64>> {
        self.inner.diagonal().map(|d| d * self.factor)
    }
}

/// `Aᵗ` as a view that remembers `A`.
///
/// The transposed operator is resolved once at construction; transposing the
/// view hands back the original operand rather than nesting wrappers.
#[derive(Debug, Clone)]
pub struct TransposeOperator {
    original: OperatorRef,
    transposed: OperatorRef,
}

impl TransposeOperator {
    pub fn new(original: OperatorRef) -> Self {
        let transposed = original.transpose();
        Self {
            original,
            transposed,
        }
    }

    /// The operator this is the transpose of.
    pub fn original(&self) -> &OperatorRef {
        &self.original
    }
}

impl LinearOperator for TransposeOperator {
    fn num_rows(&self) -> usize {
        self.original.num_cols()
    }

    fn num_cols(&self) -> usize {
        self.original.num_rows()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        self.transposed.times(v)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::clone(&self.original)
    }

    fn diagonal(&self) -> Option<DVector<f64>> {
        // transposition keeps the diagonal of a square operator
        if self.original.is_square() {
            self.original.diagonal()
        } else {
            None
        }
    }
}

/// `AᵗA`, applied as `Aᵗ (A v)` without ever being formed.
///
/// Always square (`num_cols(A) x num_cols(A)`) and symmetric.
#[derive(Debug, Clone)]
pub struct SquaredOperator {
    inner: OperatorRef,
    inner_t: OperatorRef,
}

impl SquaredOperator {
    pub fn new(inner: OperatorRef) -> Self {
        let inner_t = inner.transpose();
        Self { inner, inner_t }
    }

    /// The operator `A` being squared.
    pub fn inner(&self) -> &OperatorRef {
        &self.inner
    }
}

impl LinearOperator for SquaredOperator {
    fn num_rows(&self) -> usize {
        self.inner.num_cols()
    }

    fn num_cols(&self) -> usize {
        self.inner.num_cols()
    }

    fn times(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        check_input(self, v)?;
        self.inner_t.times(&self.inner.times(v)?)
    }

    fn transpose(&self) -> OperatorRef {
        Arc::new(self.clone())
    }

    fn diagonal(&self) -> Option<DVector<f64>> {
        // diag(AᵗA)_j = ||A[:, j]||², cheap only for dense storage
        self.inner
            .as_dense()
            .map(|m| DVector::from_iterator(m.ncols(), m.column_iter().map(|c| c.norm_squared())))
    }
}
