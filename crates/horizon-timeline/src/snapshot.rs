// crates/horizon-timeline/src/snapshot.rs
//
// Persisted per-tag field snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use horizon_core::{to_canonical_json, DissimilarityMatrix, HorizonError, Layout};

/// One release's field: the drift matrix, its totals, and the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tag: String,
    /// RFC 3339 UTC timestamp of the tag.
    pub tag_date_utc: String,
    pub nodes: Vec<String>,
    pub phi_matrix: Vec<Vec<f64>>,
    /// Total drift over unordered pairs.
    #[serde(rename = "Phi")]
    pub phi: f64,
    pub mean_phi: BTreeMap<String, f64>,
    pub kappa: BTreeMap<String, f64>,
    /// Final planar layout, stored exactly as the layout engine produced it.
    pub embed: Layout,
}

impl Snapshot {
    /// Assemble a snapshot from a validated matrix and its layout.
    ///
    /// `mean_phi` and `kappa` are indexed like `matrix.nodes()`.
    pub fn new(
        tag: impl Into<String>,
        tag_date_utc: impl Into<String>,
        matrix: &DissimilarityMatrix,
        mean_phi: &[f64],
        kappa: &[f64],
        embed: Layout,
    ) -> Self {
        let by_node = |values: &[f64]| -> BTreeMap<String, f64> {
            matrix
                .nodes()
                .iter()
                .cloned()
                .zip(values.iter().copied())
                .collect()
        };
        Self {
            tag: tag.into(),
            tag_date_utc: tag_date_utc.into(),
            nodes: matrix.nodes().to_vec(),
            phi_matrix: matrix.rows().to_vec(),
            phi: matrix.upper_triangle_sum(),
            mean_phi: by_node(mean_phi),
            kappa: by_node(kappa),
            embed,
        }
    }

    /// Canonical on-disk text: sorted keys, 2-space indent, trailing newline.
    pub fn to_json(&self) -> Result<String, HorizonError> {
        to_canonical_json(self)
    }

    pub fn from_json(text: &str) -> Result<Self, HorizonError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn read(path: &Path) -> Result<Self, HorizonError> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HorizonError::NotFound(format!("snapshot not found: {}", path.display()))
            } else {
                HorizonError::Io(format!("{}: {}", path.display(), e))
            }
        })?;
        Self::from_json(&text)
            .map_err(|e| HorizonError::Serialization(format!("{}: {}", path.display(), e)))
    }
}

/// Current time as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC 3339 timestamp and re-render it in UTC as `...Z`.
pub fn normalize_tag_date(raw: &str) -> Result<String, HorizonError> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim()).map_err(|e| {
        HorizonError::Timeline(format!("tag date {:?} is not RFC 3339: {}", raw, e))
    })?;
    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}
