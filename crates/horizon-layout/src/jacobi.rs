// crates/horizon-layout/src/jacobi.rs
//
// Pure-Rust cyclic Jacobi eigensolver for small symmetric matrices.
//
// Field snapshots hold tens of nodes, where Jacobi converges in a handful of
// sweeps and gives results that do not depend on any LAPACK build.

use horizon_core::HorizonError;
use nalgebra::DMatrix;

use crate::eigen::{EigenPairs, SymmetricEigensolver};

/// Cyclic Jacobi rotation solver with the classic threshold strategy.
#[derive(Debug, Clone, Copy)]
pub struct JacobiEigensolver {
    /// Off-diagonal magnitude below which the matrix counts as diagonal.
    pub tolerance: f64,
    /// Sweep cap; still-large off-diagonals afterwards are a failure.
    pub max_sweeps: usize,
}

impl JacobiEigensolver {
    pub fn new() -> Self {
        Self {
            tolerance: 1e-14,
            max_sweeps: 50,
        }
    }
}

impl Default for JacobiEigensolver {
    fn default() -> Self {
        Self::new()
    }
}

fn max_off_diagonal(a: &[f64], n: usize) -> f64 {
    let mut max_off: f64 = 0.0;
    for p in 0..n {
        for q in (p + 1)..n {
            max_off = max_off.max(a[p * n + q].abs());
        }
    }
    max_off
}

impl SymmetricEigensolver for JacobiEigensolver {
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

        let n = matrix.nrows();
        // Row-major working copy; destroyed in place, diagonal ends up as eigenvalues.
        let mut a: Vec<f64> = (0..n * n).map(|k| matrix[(k / n, k % n)]).collect();
        let mut v = vec![0.0; n * n];
        for i in 0..n {
            v[i * n + i] = 1.0;
        }

        let mut converged = max_off_diagonal(&a, n) < self.tolerance;
        let mut sweep = 0;
        while !converged && sweep < self.max_sweeps {
            let max_off = max_off_diagonal(&a, n);
            let threshold = if sweep < 4 {
                0.2 * max_off / (n * n) as f64
            } else {
                0.0
            };

            for p in 0..n {
                for q in (p + 1)..n {
                    let apq = a[p * n + q];
                    if apq.abs() < threshold || apq == 0.0 {
                        continue;
                    }

                    let app = a[p * n + p];
                    let aqq = a[q * n + q];
                    let diff = aqq - app;

                    let t = if diff.abs() < 1e-300 {
                        // Equal diagonal elements: rotate by pi/4.
                        apq.signum()
                    } else {
                        let tau = diff / (2.0 * apq);
                        if tau >= 0.0 {
                            1.0 / (tau + (1.0 + tau * tau).sqrt())
                        } else {
                            -1.0 / (-tau + (1.0 + tau * tau).sqrt())
                        }
                    };

                    let c = 1.0 / (1.0 + t * t).sqrt();
                    let s = t * c;
                    let tau_rot = s / (1.0 + c);

                    a[p * n + p] -= t * apq;
                    a[q * n + q] += t * apq;
                    a[p * n + q] = 0.0;
                    a[q * n + p] = 0.0;

                    for r in 0..n {
                        if r == p || r == q {
                            continue;
                        }
                        let arp = a[r * n + p];
                        let arq = a[r * n + q];
                        a[r * n + p] = arp - s * (arq + tau_rot * arp);
                        a[p * n + r] = a[r * n + p];
                        a[r * n + q] = arq + s * (arp - tau_rot * arq);
                        a[q * n + r] = a[r * n + q];
                    }

                    for r in 0..n {
                        let vrp = v[r * n + p];
                        let vrq = v[r * n + q];
                        v[r * n + p] = vrp - s * (vrq + tau_rot * vrp);
                        v[r * n + q] = vrq + s * (vrp - tau_rot * vrq);
                    }
                }
            }

            sweep += 1;
            converged = max_off_diagonal(&a, n) < self.tolerance;
        }

        if !converged {
            return Err(HorizonError::Eigen(format!(
                "Jacobi eigensolver did not converge within {} sweeps",
                self.max_sweeps
            )));
        }

        Ok(EigenPairs {
            values: (0..n).map(|i| a[i * n + i]).collect(),
            vectors: DMatrix::from_row_slice(n, n, &v),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eigen::NalgebraEigensolver;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_eigenvalues() {
        let n = 4;
        let m = DMatrix::from_fn(n, n, |i, j| if i == j { (i + 1) as f64 } else { 0.0 });
        let pairs = JacobiEigensolver::new().decompose(&m).unwrap();
        let order = pairs.descending_order();
        for (rank, &idx) in order.iter().enumerate() {
            assert_abs_diff_eq!(pairs.values[idx], (n - rank) as f64, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_eigenvectors_orthogonal() {
        let m = DMatrix::from_row_slice(
            4,
            4,
            &[
                4.0, 1.0, 0.5, 0.2, 1.0, 3.0, 0.8, 0.3, 0.5, 0.8, 2.0, 0.1, 0.2, 0.3, 0.1, 1.0,
            ],
        );
        let pairs = JacobiEigensolver::new().decompose(&m).unwrap();
        let gram = pairs.vectors.transpose() * &pairs.vectors;
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(gram[(i, j)], expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_agrees_with_nalgebra_spectrum() {
        let m = DMatrix::from_row_slice(
            3,
            3,
            &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0],
        );
        let jac = JacobiEigensolver::new().decompose(&m).unwrap();
        let nal = NalgebraEigensolver::new().decompose(&m).unwrap();
        let mut a: Vec<f64> = jac.values.clone();
        let mut b: Vec<f64> = nal.values.clone();
        a.sort_by(f64::total_cmp);
        b.sort_by(f64::total_cmp);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_sweep_cap_reports_failure() {
        let solver = JacobiEigensolver {
            tolerance: 1e-14,
            max_sweeps: 0,
        };
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]);
        let err = solver.decompose(&m).unwrap_err();
        assert!(matches!(err, HorizonError::Eigen(_)));
    }
}
