// crates/horizon-timeline/src/index.rs
//
// Hash-chained index over the snapshot files.
//
// Each entry records the SHA-256 of its snapshot file's exact bytes; the
// chain root is the SHA-256 of those hex digests joined by newlines, in
// index order. Reordering, adding or dropping an entry changes the root;
// editing a snapshot file changes its digest, which the validator re-checks.

use std::fs;

use serde::{Deserialize, Serialize};
use tracing::info;

use horizon_core::crypto::hash_hex;
use horizon_core::{to_canonical_json, HorizonError};

use crate::semver::semver_key;
use crate::snapshot::Snapshot;
use crate::store::TimelineStore;

pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub tag: String,
    /// Commit the tag points at; left empty when unknown.
    #[serde(default)]
    pub sha: String,
    pub tag_date_utc: String,
    pub snapshot_sha256: String,
    #[serde(rename = "Phi")]
    pub phi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineIndex {
    pub version: u32,
    pub tags: Vec<IndexEntry>,
    pub chain_root: String,
}

/// SHA-256 hex of the entries' snapshot digests joined by `\n`.
pub fn chain_root(entries: &[IndexEntry]) -> String {
    let joined = entries
        .iter()
        .map(|e| e.snapshot_sha256.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    hash_hex(joined.as_bytes())
}

impl TimelineIndex {
    pub fn read(store: &TimelineStore) -> Result<Self, HorizonError> {
        let path = store.index_path();
        let text = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HorizonError::NotFound(format!("{} not found", path.display()))
            } else {
                HorizonError::Io(format!("{}: {}", path.display(), e))
            }
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Rebuild the index from every snapshot on disk and write it.
pub fn build_index(store: &TimelineStore) -> Result<TimelineIndex, HorizonError> {
    let mut tags = Vec::new();
    for (_, path) in store.list_snapshots()? {
        let bytes = fs::read(&path).map_err(|e| HorizonError::Io(format!("{}: {}", path.display(), e)))?;
        let snap: Snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| HorizonError::Serialization(format!("{}: {}", path.display(), e)))?;
        tags.push(IndexEntry {
            tag: snap.tag,
            sha: String::new(),
            tag_date_utc: snap.tag_date_utc,
            snapshot_sha256: hash_hex(&bytes),
            phi: snap.phi,
        });
    }
    // Stable: equal keys keep file-name order.
    tags.sort_by_key(|entry| semver_key(&entry.tag));

    let index = TimelineIndex {
        version: INDEX_VERSION,
        chain_root: chain_root(&tags),
        tags,
    };

    let path = store.index_path();
    fs::create_dir_all(store.field_dir())?;
    fs::write(&path, to_canonical_json(&index)?)
        .map_err(|e| HorizonError::Io(format!("{}: {}", path.display(), e)))?;
    info!(entries = index.tags.len(), root = %index.chain_root, "timeline index written");
    Ok(index)
}
