// crates/horizon-cli/src/main.rs
//
// CLI entrypoint for the Horizon field pipeline.
//
// Provides subcommands for computing the drift field over node directories,
// laying out a drift matrix, writing timeline snapshots, and rebuilding and
// validating the timeline index.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::embed::EmbedCmd;
use commands::field::FieldCmd;
use commands::snapshot::SnapshotCmd;
use config::HorizonConfig;
use horizon_core::HorizonError;

/// Horizon CLI — drift fields and their timeline.
#[derive(Parser, Debug)]
#[command(
    name = "horizon",
    version = "0.1.0",
    about = "Horizon field pipeline: drift fields, deterministic layouts, timeline snapshots"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.horizon/config.toml")]
    config: String,

    /// Field directory holding timeline/ and timeline.index.json (overrides the config).
    #[arg(long, global = true)]
    field_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the pairwise drift field over node directories.
    Field(FieldCmd),

    /// Lay out a drift matrix CSV and print the coordinates.
    Embed(EmbedCmd),

    /// Write the timeline snapshot for a release tag.
    Snapshot(SnapshotCmd),

    /// Rebuild the hash-chained timeline index.
    Index,

    /// Validate the timeline index and every snapshot.
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging is configured from the file, so load it before the subscriber
    // exists and report the outcome afterwards.
    let loaded = HorizonConfig::load(&cli.config);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => HorizonConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match loaded {
        Ok(_) => tracing::debug!("Loaded configuration from {}", cli.config),
        Err(HorizonError::NotFound(_)) => {
            tracing::warn!("Could not load config from {}. Using defaults.", cli.config)
        }
        // A file that exists but is broken is never silently replaced.
        Err(e) => return Err(e.into()),
    }

    // CLI --field-dir overrides the config file value.
    if let Some(dir) = &cli.field_dir {
        config.field_dir = dir.clone();
    }

    match &cli.command {
        Commands::Field(cmd) => commands::field::run(cmd, &config).await?,
        Commands::Embed(cmd) => commands::embed::run(cmd, &config).await?,
        Commands::Snapshot(cmd) => commands::snapshot::run(cmd, &config).await?,
        Commands::Index => commands::index::run(&config).await?,
        Commands::Validate => commands::validate::run(&config).await?,
    }

    Ok(())
}
