// crates/horizon-layout/src/engine.rs
//
// Entry point wiring the spectral embedder into the orientation resolver.

use horizon_core::{DissimilarityMatrix, HorizonError, Layout, PriorCoords};
use tracing::info;

use crate::config::LayoutConfig;
use crate::eigen::{NalgebraEigensolver, SymmetricEigensolver};
use crate::resolver::{OrientationResolver, ResolveMode};
use crate::spectral::SpectralEmbedder;

/// Deterministic 2D layout engine.
///
/// A pure function of (matrix, node order, prior): holds no state between
/// calls, so one engine can serve any number of independent snapshots.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine<S = NalgebraEigensolver> {
    embedder: SpectralEmbedder<S>,
    resolver: OrientationResolver,
}

impl LayoutEngine<NalgebraEigensolver> {
    /// Engine with the nalgebra solver and the given thresholds.
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_solver(NalgebraEigensolver::new(), config)
    }
}

impl<S: SymmetricEigensolver> LayoutEngine<S> {
    pub fn with_solver(solver: S, config: LayoutConfig) -> Self {
        Self {
            embedder: SpectralEmbedder::new(solver),
            resolver: OrientationResolver::new(config),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.resolver.config()
    }

    /// Embed `matrix` and orient it against `prior`.
    ///
    /// Either returns a coordinate for every node or fails as a whole; the
    /// only failure is the eigendecomposition.
    pub fn layout(
        &self,
        matrix: &DissimilarityMatrix,
        prior: Option<&PriorCoords>,
    ) -> Result<Layout, HorizonError> {
        self.layout_with_mode(matrix, prior).map(|(layout, _)| layout)
    }

    /// Like [`LayoutEngine::layout`], also reporting which orientation mode ran.
    pub fn layout_with_mode(
        &self,
        matrix: &DissimilarityMatrix,
        prior: Option<&PriorCoords>,
    ) -> Result<(Layout, ResolveMode), HorizonError> {
        let raw = self.embedder.embed_raw(matrix)?;
        let (layout, mode) = self.resolver.resolve(&raw, matrix.nodes(), prior);
        info!(nodes = matrix.len(), mode = ?mode, "layout resolved");
        Ok((layout, mode))
    }
}

/// Lay out `matrix` with default thresholds and the nalgebra solver.
pub fn deterministic_layout(
    matrix: &DissimilarityMatrix,
    prior: Option<&PriorCoords>,
) -> Result<Layout, HorizonError> {
    LayoutEngine::new(LayoutConfig::default()).layout(matrix, prior)
}
