// crates/horizon-timeline/src/store.rs
//
// Filesystem layout of a field directory:
//
//   <field_dir>/timeline/<tag>.json     one snapshot per release tag
//   <field_dir>/timeline.index.json     hash-chained index over the snapshots
//
// Only files named `v*.json` count as snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use horizon_core::{HorizonError, PriorCoords};

use crate::semver::semver_key;
use crate::snapshot::Snapshot;

/// Handle on a field directory's timeline.
#[derive(Debug, Clone)]
pub struct TimelineStore {
    field_dir: PathBuf,
}

impl TimelineStore {
    pub fn new(field_dir: impl Into<PathBuf>) -> Self {
        Self {
            field_dir: field_dir.into(),
        }
    }

    pub fn field_dir(&self) -> &Path {
        &self.field_dir
    }

    pub fn timeline_dir(&self) -> PathBuf {
        self.field_dir.join("timeline")
    }

    pub fn index_path(&self) -> PathBuf {
        self.field_dir.join("timeline.index.json")
    }

    pub fn snapshot_path(&self, tag: &str) -> PathBuf {
        self.timeline_dir().join(format!("{}.json", tag))
    }

    /// Tags must name a `v*.json` file directly inside the timeline directory.
    pub fn check_tag(tag: &str) -> Result<(), HorizonError> {
        if !tag.starts_with('v') || tag.len() < 2 {
            return Err(HorizonError::Timeline(format!(
                "tag {:?} must start with 'v'",
                tag
            )));
        }
        if tag.contains(['/', '\\']) || tag.contains("..") {
            return Err(HorizonError::Timeline(format!(
                "tag {:?} is not a plain file name",
                tag
            )));
        }
        Ok(())
    }

    /// Snapshot files present on disk as `(tag, path)`, sorted by file name.
    ///
    /// A missing timeline directory is an empty timeline.
    pub fn list_snapshots(&self) -> Result<Vec<(String, PathBuf)>, HorizonError> {
        let dir = self.timeline_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HorizonError::Io(format!("{}: {}", dir.display(), e))),
        };

        let mut found = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(".json") {
                if stem.starts_with('v') {
                    found.push((stem.to_string(), path.clone()));
                }
            }
        }
        found.sort();
        Ok(found)
    }

    /// Write `snapshot` to `<timeline>/<tag>.json`, replacing any previous one.
    pub fn write_snapshot(&self, snapshot: &Snapshot) -> Result<PathBuf, HorizonError> {
        Self::check_tag(&snapshot.tag)?;
        let dir = self.timeline_dir();
        fs::create_dir_all(&dir).map_err(|e| HorizonError::Io(format!("{}: {}", dir.display(), e)))?;

        let path = self.snapshot_path(&snapshot.tag);
        fs::write(&path, snapshot.to_json()?)
            .map_err(|e| HorizonError::Io(format!("{}: {}", path.display(), e)))?;
        info!(tag = %snapshot.tag, path = %path.display(), "snapshot written");
        Ok(path)
    }

    pub fn read_snapshot(&self, tag: &str) -> Result<Snapshot, HorizonError> {
        Snapshot::read(&self.snapshot_path(tag))
    }

    /// Snapshot whose layout seeds the orientation of `tag`.
    ///
    /// Picks the snapshot with the greatest semver key strictly below
    /// `tag`'s; when none is lower, the latest existing one. A snapshot for
    /// `tag` itself is never its own prior. Returns `None` on an empty
    /// timeline.
    pub fn prior_for(&self, tag: &str) -> Result<Option<Snapshot>, HorizonError> {
        let mut candidates: Vec<(String, PathBuf)> = self
            .list_snapshots()?
            .into_iter()
            .filter(|(t, _)| t != tag)
            .collect();
        candidates.sort_by(|(a, _), (b, _)| semver_key(a).cmp(&semver_key(b)).then_with(|| a.cmp(b)));

        let key = semver_key(tag);
        let chosen = candidates
            .iter()
            .rev()
            .find(|(t, _)| semver_key(t) < key)
            .or_else(|| candidates.last());

        match chosen {
            Some((prior_tag, path)) => {
                debug!(tag, prior = %prior_tag, "prior snapshot selected");
                Snapshot::read(path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Prior coordinates for `tag`, taken from the chosen snapshot's layout.
    pub fn prior_coords(&self, tag: &str) -> Result<Option<PriorCoords>, HorizonError> {
        Ok(self.prior_for(tag)?.map(|snap| snap.embed.to_prior()))
    }
}
