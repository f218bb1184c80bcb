// crates/horizon-cli/src/commands/embed.rs
//
// `horizon embed --matrix <csv>` — lay out a drift matrix and print the
// coordinates.

use std::path::{Path, PathBuf};

use clap::Args;

use horizon_core::{DissimilarityMatrix, HorizonError, Layout, PriorCoords};
use horizon_field::load_square_matrix;
use horizon_layout::LayoutEngine;

use crate::config::HorizonConfig;
use crate::output::{format_json, format_table, layout_rows, OutputFormat};

/// Layout command.
#[derive(Debug, Args)]
pub struct EmbedCmd {
    /// Square drift matrix CSV (headered, or headerless with --nodes).
    #[arg(long)]
    pub matrix: PathBuf,

    /// Explicit node order.
    #[arg(long, num_args = 1..)]
    pub nodes: Vec<String>,

    /// Prior layout: a snapshot record (its `embed`) or a bare node -> [x, y] map.
    #[arg(long)]
    pub prior: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Read prior coordinates from a snapshot record or a bare layout mapping.
pub fn read_prior(path: &Path) -> Result<PriorCoords, HorizonError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| HorizonError::Io(format!("{}: {}", path.display(), e)))?;
    let mut value: serde_json::Value = serde_json::from_str(&text)?;
    let coords = if value.get("embed").is_some() {
        value["embed"].take()
    } else {
        value
    };
    let layout: Layout = serde_json::from_value(coords)?;
    Ok(layout.to_prior())
}

/// Run the embed command.
pub async fn run(cmd: &EmbedCmd, config: &HorizonConfig) -> Result<(), Box<dyn std::error::Error>> {
    let expect = (!cmd.nodes.is_empty()).then_some(cmd.nodes.as_slice());
    let (nodes, values) = load_square_matrix(&cmd.matrix, expect)?;
    let matrix = DissimilarityMatrix::new(nodes, values)?;

    let prior = cmd.prior.as_deref().map(read_prior).transpose()?;
    let engine = LayoutEngine::new(config.layout);
    let (layout, mode) = engine.layout_with_mode(&matrix, prior.as_ref())?;

    match OutputFormat::from_json_flag(cmd.json) {
        OutputFormat::Json => println!("{}", format_json(&layout)),
        OutputFormat::Table => {
            println!("Layout of {} nodes ({})", layout.len(), mode);
            println!();
            println!("{}", format_table(&layout_rows(&layout, config.layout.decimals)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_prior_from_snapshot_or_map() {
        let dir = tempfile::tempdir().unwrap();

        let snapshot = dir.path().join("v1.json");
        std::fs::write(&snapshot, r#"{"tag": "v1", "embed": {"A": [1.0, 0.0], "B": [-1.0, 0.0]}}"#)
            .unwrap();
        let prior = read_prior(&snapshot).unwrap();
        assert_eq!(prior["A"], [1.0, 0.0]);

        let bare = dir.path().join("coords.json");
        std::fs::write(&bare, r#"{"C": [0.5, 0.25]}"#).unwrap();
        let prior = read_prior(&bare).unwrap();
        assert_eq!(prior.len(), 1);
        assert_eq!(prior["C"], [0.5, 0.25]);
    }

    #[test]
    fn test_read_prior_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"embed": [1, 2]}"#).unwrap();
        assert!(read_prior(&path).is_err());
    }
}
