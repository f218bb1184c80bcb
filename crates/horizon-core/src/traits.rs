// crates/horizon-core/src/traits.rs

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HorizonError;

/// Drift between two nodes as reported by a pair metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    /// Raw drift value.
    pub phi: f64,
    /// Normalized drift, present only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi_norm: Option<f64>,
}

/// Trait for the external scalar drift function between two node directories.
///
/// Implemented by horizon-field (`ScriptMetric`, a subprocess adapter).
#[async_trait]
pub trait PairMetric: Send + Sync {
    /// Compute the drift between node `a` and node `b`.
    /// When `norm` is set the metric must also report `phi_norm`.
    async fn phi(&self, a: &Path, b: &Path, norm: bool) -> Result<PairScore, HorizonError>;
}
