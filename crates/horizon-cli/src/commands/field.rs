// crates/horizon-cli/src/commands/field.rs
//
// `horizon field <NODES...>` — run the pair metric over node directories and
// write phi_matrix.csv, kappa.csv and summary.json.

use std::path::PathBuf;

use clap::Args;

use horizon_field::{compute_field, write_field_artifacts, ScriptMetric};

use crate::config::{expand_tilde, HorizonConfig};

/// Drift field computation command.
#[derive(Debug, Args)]
pub struct FieldCmd {
    /// Node directories; each must contain a charter.json.
    #[arg(required = true)]
    pub nodes: Vec<PathBuf>,

    /// Tag or epoch label recorded in summary.json.
    #[arg(long, default_value = "epoch")]
    pub label: String,

    /// Also compute the normalized drift (Phi_norm).
    #[arg(long)]
    pub norm: bool,

    /// Metric script (overrides `metric_script` from the config).
    #[arg(long)]
    pub script: Option<String>,

    /// Output directory (overrides `out_dir` from the config).
    #[arg(long)]
    pub out_dir: Option<String>,
}

/// Run the field command.
pub async fn run(cmd: &FieldCmd, config: &HorizonConfig) -> Result<(), Box<dyn std::error::Error>> {
    let script = match &cmd.script {
        Some(s) => PathBuf::from(expand_tilde(s)),
        None => config.metric_script_path(),
    };
    let out_dir = match &cmd.out_dir {
        Some(d) => PathBuf::from(expand_tilde(d)),
        None => config.out_dir_path(),
    };

    let metric = ScriptMetric::new(config.interpreter.clone(), script);
    let report = compute_field(&cmd.nodes, &metric, cmd.norm).await?;
    let summary = write_field_artifacts(&out_dir, &report, &cmd.label)?;

    println!("Field computed for {} nodes", summary.nodes.len());
    println!("  Label:  {}", summary.label);
    println!("  Phi:    {}", summary.phi_total);
    if let Some(norm) = summary.phi_norm_total {
        println!("  Phi_norm: {}", norm);
    }
    println!("  Output: {}", out_dir.display());

    Ok(())
}
