// crates/horizon-timeline/src/lib.rs
//
// horizon-timeline: Versioned field snapshots for the Horizon pipeline.
//
// Each release tag gets one snapshot record under `<field_dir>/timeline/`.
// The previous snapshot's layout seeds the next one's orientation, and a
// hash-chained index over all snapshot files lets the whole timeline be
// validated offline.

pub mod index;
pub mod semver;
pub mod snapshot;
pub mod store;
pub mod validate;

pub use index::{build_index, chain_root, IndexEntry, TimelineIndex};
pub use semver::semver_key;
pub use snapshot::{normalize_tag_date, utc_timestamp, Snapshot};
pub use store::TimelineStore;
pub use validate::{validate_timeline, ValidationReport};
