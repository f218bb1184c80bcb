// crates/horizon-cli/src/commands/validate.rs
//
// `horizon validate` — check the timeline index against its snapshots.

use horizon_timeline::{validate_timeline, TimelineStore};

use crate::config::HorizonConfig;

/// Run the validate command. Any failure is returned as the process error.
pub async fn run(config: &HorizonConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = TimelineStore::new(config.field_dir_path());
    let report = validate_timeline(&store)?;
    println!("TIMELINE VALIDATION: ALL GREEN ({} tags)", report.tags);
    println!("Chain root: {}", report.chain_root);
    Ok(())
}
