// crates/horizon-layout/src/eigen.rs
//
// Dense symmetric eigensolver interface.
//
// The eigendecomposition of the double-centered Gram matrix is the only hard
// numeric dependency of the embedder. It sits behind `SymmetricEigensolver`
// so the embedder can be driven by nalgebra, by the pure Jacobi solver, or by
// fixture decompositions in tests.

use horizon_core::HorizonError;
use nalgebra::{DMatrix, SymmetricEigen};

/// Eigenvalues and matching eigenvectors (one per column), in solver order.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPairs {
    pub values: Vec<f64>,
    pub vectors: DMatrix<f64>,
}

impl EigenPairs {
    /// Column indices ordered by descending eigenvalue.
    ///
    /// The sort is stable, so exactly equal eigenvalues keep solver order.
    pub fn descending_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| self.values[b].total_cmp(&self.values[a]));
        order
    }
}

/// Trait for full eigendecomposition of a real symmetric matrix.
pub trait SymmetricEigensolver: Send + Sync {
    /// Decompose `matrix`. Failure (e.g. no convergence) is fatal for the caller.
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<EigenPairs, HorizonError>;
}

/// Eigensolver backed by `nalgebra::SymmetricEigen`.
#[derive(Debug, Clone, Copy)]
pub struct NalgebraEigensolver {
    /// Convergence tolerance handed to nalgebra.
    pub eps: f64,
    /// Iteration cap; exceeding it is reported as `HorizonError::Eigen`.
    pub max_iterations: usize,
}

impl NalgebraEigensolver {
    pub fn new() -> Self {
        Self {
            eps: f64::EPSILON,
            max_iterations: 10_000,
        }
    }
}

impl Default for NalgebraEigensolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SymmetricEigensolver for NalgebraEigensolver {
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<EigenPairs, HorizonError> {
        if !matrix.is_square() {
            return Err(HorizonError::Eigen(format!(
                "matrix is {}x{}, expected square",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(HorizonError::Eigen("matrix has non-finite entries".to_string()));
        }

        let eigen = SymmetricEigen::try_new(matrix.clone(), self.eps, self.max_iterations)
            .ok_or_else(|| {
                HorizonError::Eigen(format!(
                    "symmetric eigendecomposition did not converge within {} iterations",
                    self.max_iterations
                ))
            })?;

        Ok(EigenPairs {
            values: eigen.eigenvalues.iter().copied().collect(),
            vectors: eigen.eigenvectors,
        })
    }
}
