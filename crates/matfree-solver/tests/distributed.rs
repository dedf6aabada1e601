//! Conjugate gradient through the in-process partitioned executor.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use matfree_core::{
    DMatrix, DVector, DenseMatrix, DiagonalOffsetOperator, ExecutionError, LinearOperator,
    OperatorRef, SquaredOperator,
};
use matfree_solver::{
    CgConfig, ConjugateGradientSolver, DistributedConjugateGradientSolver, DistributedRowMatrix,
    Error, MatVecExecutor, MatrixHandle, PartitionedExecutor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rows: usize, cols: usize, seed: u64) -> DMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    DMatrix::from_fn(rows, cols, |_, _| rng.random::<f64>() - 0.5)
}

fn random_vector(n: usize, seed: u64) -> DVector<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    DVector::from_fn(n, |_, _| rng.random::<f64>() - 0.5)
}

/// `MᵗM + n I`, symmetric positive definite.
fn random_spd(n: usize, seed: u64) -> DMatrix<f64> {
    let m = random_matrix(n, n, seed);
    m.tr_mul(&m) + DMatrix::identity(n, n) * n as f64
}

fn distributed(name: &str, m: &DMatrix<f64>, partitions: usize) -> DistributedRowMatrix {
    let mut executor = PartitionedExecutor::new();
    let handle = executor.register(name, m, partitions).unwrap();
    DistributedRowMatrix::new(handle, Arc::new(executor))
}

#[test]
fn matches_local_solve() {
    let a = random_spd(40, 7);
    let b = random_vector(40, 8);
    let config = CgConfig::default().with_max_iterations(100);

    let local = ConjugateGradientSolver::new(config.clone())
        .solve(&DenseMatrix::new(a.clone()), &b)
        .unwrap();
    let remote = DistributedConjugateGradientSolver::new(config)
        .solve(&distributed("spd", &a, 4), &b)
        .unwrap();

    assert!(remote.converged);
    assert_eq!(local.iterations, remote.iterations);
    assert!((&local.x - &remote.x).norm() < 1e-10);
    assert!((&a * &remote.x - &b).norm() < 1e-6);
}

#[test]
fn squared_rectangular_matrix() {
    let a = random_matrix(30, 8, 11);
    let b = random_vector(8, 12);
    let ata: OperatorRef = Arc::new(SquaredOperator::new(Arc::new(distributed("tall", &a, 3))));

    let result = DistributedConjugateGradientSolver::new(CgConfig::default().with_max_iterations(50))
        .solve_operator(ata.as_ref(), &b)
        .unwrap();

    assert!(result.converged);
    let normal = a.tr_mul(&a);
    assert!((normal * &result.x - &b).norm() < 1e-6);
}

#[test]
fn ridge_on_distributed_normal_equations() {
    let a = random_matrix(25, 6, 21);
    let b = random_vector(6, 22);
    let ata: OperatorRef = Arc::new(SquaredOperator::new(Arc::new(distributed("tall", &a, 5))));
    let ridge = DiagonalOffsetOperator::scalar(ata, 0.5).unwrap();

    let result = DistributedConjugateGradientSolver::default()
        .solve_operator(&ridge, &b)
        .unwrap();

    assert!(result.converged);
    let shifted = a.tr_mul(&a) + DMatrix::identity(6, 6) * 0.5;
    assert!((shifted * &result.x - &b).norm() < 1e-6);
}

#[test]
fn transposed_handle_multiplies_transpose() {
    let a = random_matrix(9, 4, 31);
    let op = distributed("a", &a, 2);
    let t = op.transpose();
    assert_eq!((t.num_rows(), t.num_cols()), (4, 9));

    let u = random_vector(9, 32);
    assert!((t.times(&u).unwrap() - a.tr_mul(&u)).norm() < 1e-12);
}

/// Fails on the given call with a partition error.
#[derive(Debug)]
struct FailingExecutor {
    inner: PartitionedExecutor,
    fail_on: usize,
    calls: AtomicUsize,
}

impl MatVecExecutor for FailingExecutor {
    fn multiply(
        &self,
        handle: &MatrixHandle,
        v: &DVector<f64>,
    ) -> Result<DVector<f64>, ExecutionError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(ExecutionError::PartitionFailed {
                partition: 1,
                reason: "worker lost".to_string(),
            });
        }
        self.inner.multiply(handle, v)
    }
}

#[test]
fn executor_failure_aborts_solve() {
    let a = random_spd(12, 41);
    let mut inner = PartitionedExecutor::new();
    let handle = inner.register("spd", &a, 3).unwrap();
    let executor = Arc::new(FailingExecutor {
        inner,
        fail_on: 3,
        calls: AtomicUsize::new(0),
    });
    let matrix = DistributedRowMatrix::new(handle, executor.clone());

    let err = DistributedConjugateGradientSolver::default()
        .solve(&matrix, &random_vector(12, 42))
        .unwrap_err();

    match err {
        Error::Execution(e) => assert_eq!(
            e,
            ExecutionError::PartitionFailed {
                partition: 1,
                reason: "worker lost".to_string(),
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
    // no retry after the failure
    assert_eq!(executor.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn unknown_matrix_fails_on_first_multiply() {
    let matrix = DistributedRowMatrix::new(
        MatrixHandle::new("missing", 3, 3),
        Arc::new(PartitionedExecutor::new()),
    );
    let err = DistributedConjugateGradientSolver::default()
        .solve(&matrix, &DVector::from_element(3, 1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Execution(ExecutionError::MatrixNotFound(ref name)) if name == "missing"
    ));
}
