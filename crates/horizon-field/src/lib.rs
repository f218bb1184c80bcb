// crates/horizon-field/src/lib.rs
//
// horizon-field: Pairwise drift field computation for the Horizon pipeline.
//
// Runs the external pair metric over every pair of node directories, derives
// per-node statistics (mean drift, kappa), and reads/writes the CSV and JSON
// artefacts that the snapshot step consumes.

pub mod artifacts;
pub mod csv_matrix;
pub mod field;
pub mod metric;

pub use artifacts::{load_kappa_table, write_field_artifacts, FieldSummary};
pub use csv_matrix::{load_square_matrix, parse_square_matrix};
pub use field::{compute_field, node_statistics, FieldReport, NodeStats};
pub use metric::ScriptMetric;
