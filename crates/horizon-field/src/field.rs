// crates/horizon-field/src/field.rs
//
// Drift field over a set of node directories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use horizon_core::{HorizonError, PairMetric};

/// Per-node statistics derived from one row of the drift matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    pub name: String,
    /// Sum of squared deviations of the row's off-diagonal drift from its mean.
    pub kappa: f64,
    /// Number of other nodes.
    pub degree: usize,
    /// Mean off-diagonal drift.
    pub mean_phi: f64,
    /// Lines in the node's `events.jsonl`.
    pub event_count: u64,
}

/// Full result of a field computation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub nodes: Vec<String>,
    /// Symmetric raw drift matrix, zero diagonal.
    pub phi: Vec<Vec<f64>>,
    /// Normalized drift matrix, only when requested.
    pub phi_norm: Option<Vec<Vec<f64>>>,
    /// Sum of the raw drift over unordered pairs.
    pub phi_total: f64,
    /// Sum of the normalized drift over unordered pairs.
    pub phi_norm_total: Option<f64>,
    pub stats: Vec<NodeStats>,
}

/// Mean off-diagonal drift and kappa for each row of `phi`.
///
/// The mean divides by `n - 1` (by 1 for a single node).
pub fn node_statistics(phi: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    let n = phi.len();
    let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let mut mean_phi = Vec::with_capacity(n);
    let mut kappa = Vec::with_capacity(n);
    for (i, row) in phi.iter().enumerate() {
        let off_diagonal = || row.iter().enumerate().filter(move |(j, _)| *j != i);
        let mean = off_diagonal().map(|(_, v)| v).sum::<f64>() / denom;
        let spread = off_diagonal().map(|(_, v)| (v - mean).powi(2)).sum::<f64>();
        mean_phi.push(mean);
        kappa.push(spread);
    }
    (mean_phi, kappa)
}

fn upper_triangle_sum(m: &[Vec<f64>]) -> f64 {
    let n = m.len();
    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .map(|(i, j)| m[i][j])
        .sum()
}

async fn count_events(node: &Path) -> Result<u64, HorizonError> {
    let path = node.join("events.jsonl");
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => Ok(text.lines().count() as u64),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(HorizonError::Io(format!("{}: {}", path.display(), e))),
    }
}

fn node_name(path: &Path) -> Result<String, HorizonError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| HorizonError::NotFound(format!("no directory name in {}", path.display())))
}

/// Compute the drift field over `node_dirs`.
///
/// Every directory must contain a `charter.json`. Pairs are evaluated in
/// upper-triangle order, one metric call per unordered pair, and mirrored.
pub async fn compute_field(
    node_dirs: &[PathBuf],
    metric: &dyn PairMetric,
    norm: bool,
) -> Result<FieldReport, HorizonError> {
    for dir in node_dirs {
        if !tokio::fs::try_exists(dir.join("charter.json")).await? {
            return Err(HorizonError::NotFound(format!(
                "missing charter.json in {}",
                dir.display()
            )));
        }
    }

    let nodes = node_dirs
        .iter()
        .map(|d| node_name(d))
        .collect::<Result<Vec<_>, _>>()?;
    let n = nodes.len();

    let mut phi = vec![vec![0.0; n]; n];
    let mut phi_norm = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let score = metric.phi(&node_dirs[i], &node_dirs[j], norm).await?;
            phi[i][j] = score.phi;
            phi[j][i] = score.phi;
            let nv = score.phi_norm.unwrap_or(0.0);
            phi_norm[i][j] = nv;
            phi_norm[j][i] = nv;
            debug!(a = %nodes[i], b = %nodes[j], phi = score.phi, "pair evaluated");
        }
    }

    let (mean_phi, kappa) = node_statistics(&phi);
    let mut stats = Vec::with_capacity(n);
    for (i, name) in nodes.iter().enumerate() {
        stats.push(NodeStats {
            name: name.clone(),
            kappa: kappa[i],
            degree: n.saturating_sub(1),
            mean_phi: mean_phi[i],
            event_count: count_events(&node_dirs[i]).await?,
        });
    }

    let phi_total = upper_triangle_sum(&phi);
    let phi_norm_total = norm.then(|| upper_triangle_sum(&phi_norm));
    info!(nodes = n, phi_total, "field computed");

    Ok(FieldReport {
        nodes,
        phi,
        phi_norm: norm.then_some(phi_norm),
        phi_total,
        phi_norm_total,
        stats,
    })
}
