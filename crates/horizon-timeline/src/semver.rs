// crates/horizon-timeline/src/semver.rs

/// Ordering key for a release tag.
///
/// The first three runs of ASCII digits, zero-padded to three components:
/// `v1.2.3` -> (1, 2, 3), `v2` -> (2, 0, 0), `release` -> (0, 0, 0).
/// Runs too large for a u64 saturate.
pub fn semver_key(tag: &str) -> (u64, u64, u64) {
    let mut parts = [0u64; 3];
    let runs = tag
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .take(3);
    for (slot, run) in parts.iter_mut().zip(runs) {
        *slot = run.parse().unwrap_or(u64::MAX);
    }
    (parts[0], parts[1], parts[2])
}
