// crates/horizon-field/src/artifacts.rs
//
// On-disk artefacts of a field computation: phi_matrix.csv, kappa.csv and
// summary.json in the output directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use horizon_core::{to_canonical_json, HorizonError};

use crate::field::{FieldReport, NodeStats};

/// Machine-readable summary of one field computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Tag or epoch label supplied by the caller.
    pub label: String,
    pub nodes: Vec<String>,
    #[serde(rename = "Phi")]
    pub phi_total: f64,
    #[serde(rename = "Phi_norm", default, skip_serializing_if = "Option::is_none")]
    pub phi_norm_total: Option<f64>,
    pub kappa: BTreeMap<String, f64>,
    pub mean_phi: BTreeMap<String, f64>,
    pub event_counts: BTreeMap<String, u64>,
}

impl FieldSummary {
    pub fn from_report(report: &FieldReport, label: &str) -> Self {
        Self {
            label: label.to_string(),
            nodes: report.nodes.clone(),
            phi_total: report.phi_total,
            phi_norm_total: report.phi_norm_total,
            kappa: report.stats.iter().map(|s| (s.name.clone(), s.kappa)).collect(),
            mean_phi: report.stats.iter().map(|s| (s.name.clone(), s.mean_phi)).collect(),
            event_counts: report
                .stats
                .iter()
                .map(|s| (s.name.clone(), s.event_count))
                .collect(),
        }
    }
}

/// `node,<names...>` header followed by one row per node.
pub fn phi_matrix_csv(nodes: &[String], phi: &[Vec<f64>]) -> String {
    let mut out = format!("node,{}\n", nodes.join(","));
    for (name, row) in nodes.iter().zip(phi) {
        let cells: Vec<String> = row.iter().map(|v| format!("{:?}", v)).collect();
        out.push_str(&format!("{},{}\n", name, cells.join(",")));
    }
    out
}

/// `node,kappa,degree,mean_phi,event_count` table.
pub fn kappa_csv(report: &FieldReport) -> String {
    let mut out = String::from("node,kappa,degree,mean_phi,event_count\n");
    for s in &report.stats {
        out.push_str(&format!(
            "{},{:?},{},{:?},{}\n",
            s.name, s.kappa, s.degree, s.mean_phi, s.event_count
        ));
    }
    out
}

/// Parse a `kappa.csv` table back into per-node statistics.
///
/// Columns after `kappa` are optional; missing or unparsable numbers read
/// as 0.
pub fn parse_kappa_table(text: &str, source: &str) -> Result<Vec<NodeStats>, HorizonError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty());
    match lines.next() {
        Some(header) if header.split(',').next().map(str::trim) == Some("node") => {}
        _ => {
            return Err(HorizonError::Csv(format!(
                "{}: header must start with `node,kappa`",
                source
            )))
        }
    }

    let mut stats = Vec::new();
    for line in lines {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() < 2 {
            return Err(HorizonError::Csv(format!("{}: short row {:?}", source, line)));
        }
        let cell = |k: usize| cells.get(k).copied().unwrap_or("");
        stats.push(NodeStats {
            name: cells[0].to_string(),
            kappa: cell(1).parse().unwrap_or(0.0),
            degree: cell(2).parse().unwrap_or(0),
            mean_phi: cell(3).parse().unwrap_or(0.0),
            event_count: cell(4).parse().unwrap_or(0),
        });
    }
    Ok(stats)
}

/// Read `kappa.csv`; a missing file is `NotFound`.
pub fn load_kappa_table(path: &Path) -> Result<Vec<NodeStats>, HorizonError> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HorizonError::NotFound(format!("required CSV not found: {}", path.display()))
        } else {
            HorizonError::Io(format!("{}: {}", path.display(), e))
        }
    })?;
    parse_kappa_table(&text, &path.display().to_string())
}

fn write_file(path: &Path, contents: &str) -> Result<(), HorizonError> {
    fs::write(path, contents).map_err(|e| HorizonError::Io(format!("{}: {}", path.display(), e)))
}

/// Write all field artefacts into `out_dir`, creating it if needed.
///
/// Returns the summary that was written to `summary.json`.
pub fn write_field_artifacts(
    out_dir: &Path,
    report: &FieldReport,
    label: &str,
) -> Result<FieldSummary, HorizonError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| HorizonError::Io(format!("{}: {}", out_dir.display(), e)))?;

    let phi_path: PathBuf = out_dir.join("phi_matrix.csv");
    write_file(&phi_path, &phi_matrix_csv(&report.nodes, &report.phi))?;
    write_file(&out_dir.join("kappa.csv"), &kappa_csv(report))?;

    let summary = FieldSummary::from_report(report, label);
    write_file(&out_dir.join("summary.json"), &to_canonical_json(&summary)?)?;
    info!(dir = %out_dir.display(), "field artefacts written");
    Ok(summary)
}
