// crates/horizon-layout/src/spectral.rs
//
// Classical MDS: dissimilarities → raw 2D coordinates with a canonical
// per-axis sign. Knows nothing about snapshot history.

use horizon_core::{DissimilarityMatrix, HorizonError};
use nalgebra::DMatrix;
use tracing::debug;

use crate::eigen::{NalgebraEigensolver, SymmetricEigensolver};

/// A single 2D coordinate.
pub type Point = [f64; 2];

/// Double-center the squared dissimilarities: `B = -1/2 · J · (D∘D) · J`
/// with `J = I - (1/n)·11ᵀ`. The result is the Gram matrix of the
/// configuration that classical MDS recovers.
pub fn double_center(matrix: &DissimilarityMatrix) -> DMatrix<f64> {
    let n = matrix.len();
    let squared = DMatrix::from_fn(n, n, |i, j| {
        let d = matrix.get(i, j);
        d * d
    });
    let centering =
        DMatrix::<f64>::identity(n, n) - DMatrix::from_element(n, n, 1.0 / n as f64);
    (&centering * -0.5) * squared * &centering
}

/// Flip each axis so its largest-magnitude value is positive.
///
/// Ties on magnitude resolve to the first row. Applying this twice is the
/// same as applying it once.
pub fn sign_fix(points: &mut [Point]) {
    for axis in 0..2 {
        let mut best = 0;
        let mut best_abs = match points.first() {
            Some(p) => p[axis].abs(),
            None => return,
        };
        for (row, p) in points.iter().enumerate().skip(1) {
            if p[axis].abs() > best_abs {
                best_abs = p[axis].abs();
                best = row;
            }
        }
        if points[best][axis] < 0.0 {
            for p in points.iter_mut() {
                p[axis] = -p[axis];
            }
        }
    }
}

/// Classical MDS embedder fixed to two output dimensions.
#[derive(Debug, Clone, Default)]
pub struct SpectralEmbedder<S = NalgebraEigensolver> {
    solver: S,
}

impl<S: SymmetricEigensolver> SpectralEmbedder<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Compute raw coordinates, one row per node in matrix order.
    ///
    /// `n == 0` gives no points and `n == 1` gives the origin. Otherwise the
    /// top two eigenpairs of the double-centered matrix are scaled by the
    /// square roots of their eigenvalues (negative eigenvalues clipped to 0)
    /// and each axis is sign-canonicalized.
    pub fn embed_raw(&self, matrix: &DissimilarityMatrix) -> Result<Vec<Point>, HorizonError> {
        let n = matrix.len();
        match n {
            0 => return Ok(Vec::new()),
            1 => return Ok(vec![[0.0, 0.0]]),
            _ => {}
        }

        let gram = double_center(matrix);
        let pairs = self.solver.decompose(&gram)?;
        if pairs.values.len() != n || pairs.vectors.shape() != (n, n) {
            return Err(HorizonError::Eigen(format!(
                "solver returned {} eigenvalues and a {:?} eigenvector matrix for n={}",
                pairs.values.len(),
                pairs.vectors.shape(),
                n
            )));
        }

        let order = pairs.descending_order();
        let (first, second) = (order[0], order[1]);
        let scale = [
            pairs.values[first].max(0.0).sqrt(),
            pairs.values[second].max(0.0).sqrt(),
        ];
        debug!(
            n,
            lambda_1 = pairs.values[first],
            lambda_2 = pairs.values[second],
            "spectral embedding"
        );

        let mut points: Vec<Point> = (0..n)
            .map(|i| {
                [
                    pairs.vectors[(i, first)] * scale[0],
                    pairs.vectors[(i, second)] * scale[1],
                ]
            })
            .collect();
        sign_fix(&mut points);
        Ok(points)
    }
}
