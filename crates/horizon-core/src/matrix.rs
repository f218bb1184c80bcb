// crates/horizon-core/src/matrix.rs
//
// Validated N×N dissimilarity matrix paired with its ordered node names.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::HorizonError;

/// Diagonal entries with magnitude up to this value are accepted and stored as 0.0.
pub const DIAGONAL_TOLERANCE: f64 = 1e-4;

/// A symmetric, non-negative, zero-diagonal matrix of pairwise distances.
///
/// Row/column order follows `nodes`. Construction validates the contract the
/// embedder relies on, so any `DissimilarityMatrix` value can be embedded
/// without further checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissimilarityMatrix {
    nodes: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl DissimilarityMatrix {
    /// Validate and build a matrix.
    ///
    /// Fails with `InvalidMatrix` on duplicate names, a size mismatch between
    /// `nodes` and `values`, ragged rows, non-finite or negative entries,
    /// asymmetry, or a diagonal entry larger than `DIAGONAL_TOLERANCE`.
    pub fn new(nodes: Vec<String>, mut values: Vec<Vec<f64>>) -> Result<Self, HorizonError> {
        let n = nodes.len();

        let mut seen = HashSet::with_capacity(n);
        for name in &nodes {
            if !seen.insert(name.as_str()) {
                return Err(HorizonError::InvalidMatrix(format!(
                    "duplicate node name: {}",
                    name
                )));
            }
        }

        if values.len() != n || values.iter().any(|row| row.len() != n) {
            let sizes: Vec<usize> = values.iter().map(|row| row.len()).collect();
            return Err(HorizonError::InvalidMatrix(format!(
                "node/matrix size mismatch: nodes={}, matrix has {} rows with row lengths={:?}",
                n,
                values.len(),
                sizes
            )));
        }

        for i in 0..n {
            if !values[i][i].is_finite() || values[i][i].abs() > DIAGONAL_TOLERANCE {
                return Err(HorizonError::InvalidMatrix(format!(
                    "diagonal non-zero at ({},{})",
                    i, i
                )));
            }
            values[i][i] = 0.0;
            for j in (i + 1)..n {
                let a = values[i][j];
                let b = values[j][i];
                if !a.is_finite() || !b.is_finite() {
                    return Err(HorizonError::InvalidMatrix(format!(
                        "non-finite entry at ({},{}) or ({},{})",
                        i, j, j, i
                    )));
                }
                if a < 0.0 || b < 0.0 {
                    return Err(HorizonError::InvalidMatrix(format!(
                        "negative entry at ({},{}) or ({},{})",
                        i, j, j, i
                    )));
                }
                if a != b {
                    return Err(HorizonError::InvalidMatrix(format!(
                        "asymmetry [{},{}]={} vs [{},{}]={}",
                        i, j, a, j, i, b
                    )));
                }
            }
        }

        Ok(Self { nodes, values })
    }

    /// An empty (0×0) matrix.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ordered node names.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Row-major matrix entries.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Entry at (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Sum of the strict upper triangle (the aggregate field drift `Phi`).
    pub fn upper_triangle_sum(&self) -> f64 {
        let n = self.len();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| self.values[i][j])
            .sum()
    }
}
