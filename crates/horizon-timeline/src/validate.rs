// crates/horizon-timeline/src/validate.rs
//
// Offline consistency check of a field directory's timeline.

use std::collections::{BTreeSet, HashSet};
use std::fs;

use tracing::info;

use horizon_core::crypto::hash_hex;
use horizon_core::matrix::DIAGONAL_TOLERANCE;
use horizon_core::HorizonError;

use crate::index::{chain_root, TimelineIndex};
use crate::semver::semver_key;
use crate::snapshot::Snapshot;
use crate::store::TimelineStore;

/// Summary of a timeline that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub tags: usize,
    pub chain_root: String,
}

fn fail(msg: impl Into<String>) -> HorizonError {
    HorizonError::Timeline(msg.into())
}

/// Check the index against the snapshot files and each snapshot's matrix.
///
/// Stops at the first problem, naming the offending tag or cell.
pub fn validate_timeline(store: &TimelineStore) -> Result<ValidationReport, HorizonError> {
    let index = match TimelineIndex::read(store) {
        Ok(index) => index,
        Err(HorizonError::NotFound(_)) => return Err(fail("timeline.index.json not found")),
        Err(e) => return Err(e),
    };
    if index.tags.is_empty() {
        return Err(fail("timeline.index.json: tags[] empty"));
    }

    let mut seen = HashSet::new();
    let mut prev = (0, 0, 0);
    for entry in &index.tags {
        let key = semver_key(&entry.tag);
        if key < prev {
            return Err(fail(format!("non-monotonic tag order: {}", entry.tag)));
        }
        if !seen.insert(entry.tag.as_str()) {
            return Err(fail(format!("duplicate tag in index: {}", entry.tag)));
        }
        prev = key;
        if entry.phi < 0.0 {
            return Err(fail(format!("negative Phi in index entry for {}", entry.tag)));
        }
    }

    let wanted: BTreeSet<&str> = index.tags.iter().map(|e| e.tag.as_str()).collect();
    let listed = store.list_snapshots()?;
    let actual: BTreeSet<&str> = listed.iter().map(|(t, _)| t.as_str()).collect();

    let missing: Vec<&str> = wanted.difference(&actual).copied().collect();
    if !missing.is_empty() {
        return Err(fail(format!(
            "missing snapshots for indexed tags: {}",
            missing.join(", ")
        )));
    }
    let stray: Vec<&str> = actual.difference(&wanted).copied().collect();
    if !stray.is_empty() {
        return Err(fail(format!("snapshots not listed in index: {}", stray.join(", "))));
    }

    if chain_root(&index.tags) != index.chain_root {
        return Err(fail("chain_root mismatch"));
    }

    for entry in &index.tags {
        let path = store.snapshot_path(&entry.tag);
        let where_ = path.display();
        let bytes = fs::read(&path).map_err(|e| HorizonError::Io(format!("{}: {}", where_, e)))?;
        if hash_hex(&bytes) != entry.snapshot_sha256 {
            return Err(fail(format!(
                "{}: content does not match snapshot_sha256 in index",
                where_
            )));
        }
        let snap: Snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| HorizonError::Serialization(format!("{}: {}", where_, e)))?;
        if snap.tag != entry.tag {
            return Err(fail(format!("{}: tag mismatch", where_)));
        }

        let n = snap.nodes.len();
        let d = &snap.phi_matrix;
        if n == 0 || d.len() != n || d.iter().any(|row| row.len() != n) {
            return Err(fail(format!("{}: phi_matrix shape mismatch with nodes", where_)));
        }
        for i in 0..n {
            if d[i][i].abs() > DIAGONAL_TOLERANCE {
                return Err(fail(format!(
                    "{}: phi_matrix diagonal non-zero at ({},{})",
                    where_, i, i
                )));
            }
            for j in (i + 1)..n {
                let (a, b) = (d[i][j], d[j][i]);
                if a < 0.0 || b < 0.0 {
                    return Err(fail(format!(
                        "{}: negative phi at ({},{}) or ({},{})",
                        where_, i, j, j, i
                    )));
                }
                if a != b {
                    return Err(fail(format!(
                        "{}: asymmetry phi[{},{}]={} vs phi[{},{}]={}",
                        where_, i, j, a, j, i, b
                    )));
                }
            }
        }
    }

    info!(tags = index.tags.len(), "timeline validation passed");
    Ok(ValidationReport {
        tags: index.tags.len(),
        chain_root: index.chain_root,
    })
}
