// crates/horizon-cli/src/commands/snapshot.rs
//
// `horizon snapshot --tag <tag>` — turn the current field artefacts into a
// timeline snapshot, oriented against the previous release's layout.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::warn;

use horizon_core::{DissimilarityMatrix, HorizonError};
use horizon_field::{load_kappa_table, load_square_matrix, node_statistics};
use horizon_layout::{LayoutConfig, LayoutEngine, ResolveMode};
use horizon_timeline::{normalize_tag_date, utc_timestamp, Snapshot, TimelineStore};

use crate::config::{expand_tilde, HorizonConfig};

/// Snapshot command.
#[derive(Debug, Args)]
pub struct SnapshotCmd {
    /// Release tag, e.g. v0.4.0.
    #[arg(long)]
    pub tag: String,

    /// RFC 3339 date of the tag (default: now, UTC).
    #[arg(long)]
    pub tag_date: Option<String>,

    /// Explicit node order for the matrix CSV.
    #[arg(long, num_args = 1..)]
    pub nodes: Vec<String>,

    /// Directory with phi_matrix.csv and kappa.csv (overrides `out_dir`).
    #[arg(long)]
    pub out_dir: Option<String>,
}

/// Outcome of writing one snapshot.
#[derive(Debug)]
pub struct SnapshotOutcome {
    pub snapshot: Snapshot,
    pub mode: ResolveMode,
    pub path: PathBuf,
}

/// Kappa per node from `kappa.csv`, falling back to recomputing from the matrix.
fn kappa_for(out_dir: &Path, matrix: &DissimilarityMatrix) -> Result<Vec<f64>, HorizonError> {
    let (_, computed) = node_statistics(matrix.rows());
    let path = out_dir.join("kappa.csv");
    let table = match load_kappa_table(&path) {
        Ok(table) => table,
        Err(HorizonError::NotFound(_)) => {
            warn!(path = %path.display(), "kappa.csv missing; recomputing kappa from phi_matrix.csv");
            return Ok(computed);
        }
        Err(e) => return Err(e),
    };

    if table.len() != matrix.len() {
        return Err(HorizonError::Csv(format!(
            "{}: {} rows for {} nodes",
            path.display(),
            table.len(),
            matrix.len()
        )));
    }
    matrix
        .nodes()
        .iter()
        .map(|name| {
            table
                .iter()
                .find(|s| &s.name == name)
                .map(|s| s.kappa)
                .ok_or_else(|| HorizonError::Csv(format!("{}: no row for node {}", path.display(), name)))
        })
        .collect()
}

/// Build and write the snapshot for `tag` from the artefacts in `out_dir`.
pub fn write_snapshot(
    tag: &str,
    tag_date_utc: String,
    nodes: &[String],
    out_dir: &Path,
    store: &TimelineStore,
    layout_config: LayoutConfig,
) -> Result<SnapshotOutcome, HorizonError> {
    TimelineStore::check_tag(tag)?;
    let expect = (!nodes.is_empty()).then_some(nodes);
    let (names, values) = load_square_matrix(&out_dir.join("phi_matrix.csv"), expect)?;
    let matrix = DissimilarityMatrix::new(names, values)?;

    let (mean_phi, _) = node_statistics(matrix.rows());
    let kappa = kappa_for(out_dir, &matrix)?;

    let prior = store.prior_coords(tag)?;
    let engine = LayoutEngine::new(layout_config);
    let (layout, mode) = engine.layout_with_mode(&matrix, prior.as_ref())?;

    let snapshot = Snapshot::new(tag, tag_date_utc, &matrix, &mean_phi, &kappa, layout);
    let path = store.write_snapshot(&snapshot)?;
    Ok(SnapshotOutcome {
        snapshot,
        mode,
        path,
    })
}

/// Run the snapshot command.
pub async fn run(cmd: &SnapshotCmd, config: &HorizonConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tag_date = match &cmd.tag_date {
        Some(raw) => normalize_tag_date(raw)?,
        None => utc_timestamp(),
    };
    let out_dir = match &cmd.out_dir {
        Some(d) => PathBuf::from(expand_tilde(d)),
        None => config.out_dir_path(),
    };
    let store = TimelineStore::new(config.field_dir_path());

    let outcome = write_snapshot(&cmd.tag, tag_date, &cmd.nodes, &out_dir, &store, config.layout)?;

    println!("Snapshot {} written", outcome.snapshot.tag);
    println!("  Nodes:       {}", outcome.snapshot.nodes.len());
    println!("  Phi:         {}", outcome.snapshot.phi);
    println!("  Orientation: {}", outcome.mode);
    println!("  Path:        {}", outcome.path.display());
    println!();
    println!("Run `horizon index` to refresh the timeline index.");

    Ok(())
}
