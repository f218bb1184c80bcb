// crates/horizon-core/src/lib.rs
//
// horizon-core: Core types, traits, and hashing primitives for the Horizon
// field pipeline.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the validated dissimilarity matrix, the layout/prior coordinate
// types exchanged between snapshots, the error type, SHA-256 helpers, and
// the trait interface for external pair metrics.

pub mod crypto;
pub mod error;
pub mod json;
pub mod layout;
pub mod matrix;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use horizon_core::Layout;`

// Matrix types
pub use matrix::DissimilarityMatrix;

// Coordinate types
pub use layout::{Layout, PriorCoords};

// Error type
pub use error::HorizonError;

// Canonical artefact encoding
pub use json::to_canonical_json;

// Traits
pub use traits::{PairMetric, PairScore};
