// crates/horizon-layout/src/lib.rs
//
// horizon-layout: Deterministic planar embedding for Horizon field snapshots.
//
// Turns an N×N dissimilarity matrix into a 2D point layout that stays
// visually stable across a timeline of independently computed snapshots.
// The spectral embedder (classical MDS) produces raw coordinates with a
// canonical per-axis sign; the orientation resolver then removes the
// remaining rotation/reflection/axis-swap freedom, either by aligning to the
// previous snapshot or, for a first snapshot, by anchoring to a probe
// derived from the node names.

pub mod anchor;
pub mod config;
pub mod continuity;
pub mod eigen;
pub mod engine;
pub mod jacobi;
pub mod quantize;
pub mod resolver;
pub mod spectral;
pub mod transform;

pub use config::LayoutConfig;
pub use eigen::{EigenPairs, NalgebraEigensolver, SymmetricEigensolver};
pub use engine::{deterministic_layout, LayoutEngine};
pub use jacobi::JacobiEigensolver;
pub use resolver::{OrientationResolver, ResolveMode};
pub use spectral::{Point, SpectralEmbedder};
pub use transform::{AxisTransform, AMBIGUITY_GROUP};
