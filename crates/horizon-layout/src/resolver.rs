// crates/horizon-layout/src/resolver.rs
//
// Orientation resolver: raw spectral coordinates + optional prior snapshot →
// final quantized layout.

use horizon_core::{Layout, PriorCoords};
use tracing::{debug, info};

use crate::anchor::anchor_first_snapshot;
use crate::config::LayoutConfig;
use crate::continuity::align_to_prior;
use crate::quantize::finalize;
use crate::spectral::Point;

/// Which orientation strategy produced a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolveMode {
    /// No prior snapshot: orientation pinned by the name probe.
    HashAnchored,
    /// Aligned to the prior snapshot with the given transform.
    Continuity(crate::transform::AxisTransform),
    /// A prior exists but shares too few nodes; raw orientation kept.
    Passthrough,
}

impl std::fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveMode::HashAnchored => write!(f, "hash-anchored"),
            ResolveMode::Continuity(t) => write!(
                f,
                "continuity (swap={}, x_sign={}, y_sign={})",
                t.swap, t.x_sign, t.y_sign
            ),
            ResolveMode::Passthrough => write!(f, "passthrough"),
        }
    }
}

/// Removes the residual rotation/reflection ambiguity of a raw embedding.
#[derive(Debug, Clone, Default)]
pub struct OrientationResolver {
    config: LayoutConfig,
}

impl OrientationResolver {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Orient `points` (one per entry of `nodes`) and quantize them.
    ///
    /// A non-empty `prior` selects continuity mode; fewer than
    /// `min_shared_entities` overlapping nodes then leaves the raw orientation
    /// in place rather than falling back to hash anchoring. An absent or empty
    /// prior selects hash-anchored mode.
    pub fn resolve(
        &self,
        points: &[Point],
        nodes: &[String],
        prior: Option<&PriorCoords>,
    ) -> (Layout, ResolveMode) {
        debug_assert_eq!(points.len(), nodes.len());

        let (oriented, mode) = match prior.filter(|p| !p.is_empty()) {
            Some(prior) => {
                match align_to_prior(points, nodes, prior, self.config.min_shared_entities) {
                    Some(alignment) => {
                        debug!(
                            shared = alignment.shared,
                            residual = alignment.residual,
                            transform = ?alignment.transform,
                            "continuity alignment"
                        );
                        (
                            alignment.transform.apply_all(points),
                            ResolveMode::Continuity(alignment.transform),
                        )
                    }
                    None => {
                        info!(
                            required = self.config.min_shared_entities,
                            "too few nodes shared with prior snapshot, keeping raw orientation"
                        );
                        (points.to_vec(), ResolveMode::Passthrough)
                    }
                }
            }
            None => (
                anchor_first_snapshot(points, nodes, &self.config),
                ResolveMode::HashAnchored,
            ),
        };

        let eps = self.config.snap_epsilon;
        let decimals = self.config.decimals;
        let layout: Layout = nodes
            .iter()
            .zip(oriented)
            .map(|(name, [x, y])| {
                (
                    name.clone(),
                    [finalize(x, eps, decimals), finalize(y, eps, decimals)],
                )
            })
            .collect();
        (layout, mode)
    }
}
