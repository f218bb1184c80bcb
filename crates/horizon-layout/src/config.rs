// crates/horizon-layout/src/config.rs
//
// Numeric thresholds for the embedding engine. Owned by the resolver and
// passed explicitly, so tests can vary them.

use serde::Deserialize;

/// Thresholds and precision used by the orientation resolver.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutConfig {
    /// Final coordinates with magnitude below this are written as exactly 0.0.
    #[serde(default = "default_snap_epsilon")]
    pub snap_epsilon: f64,

    /// Near-zero snap applied right after the hash-anchored rotation.
    #[serde(default = "default_rotation_snap_epsilon")]
    pub rotation_snap_epsilon: f64,

    /// Probe projections with a norm below this are treated as degenerate.
    #[serde(default = "default_probe_degenerate_norm")]
    pub probe_degenerate_norm: f64,

    /// Decimal digits kept in the final coordinates.
    #[serde(default = "default_decimals")]
    pub decimals: usize,

    /// Minimum number of nodes shared with the prior snapshot for continuity alignment.
    #[serde(default = "default_min_shared_entities")]
    pub min_shared_entities: usize,
}

fn default_snap_epsilon() -> f64 {
    1e-4
}

fn default_rotation_snap_epsilon() -> f64 {
    1e-12
}

fn default_probe_degenerate_norm() -> f64 {
    1e-15
}

fn default_decimals() -> usize {
    4
}

fn default_min_shared_entities() -> usize {
    2
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            snap_epsilon: default_snap_epsilon(),
            rotation_snap_epsilon: default_rotation_snap_epsilon(),
            probe_degenerate_norm: default_probe_degenerate_norm(),
            decimals: default_decimals(),
            min_shared_entities: default_min_shared_entities(),
        }
    }
}
