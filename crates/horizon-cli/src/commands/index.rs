// crates/horizon-cli/src/commands/index.rs
//
// `horizon index` — rebuild timeline.index.json from the snapshot files.

use horizon_timeline::{build_index, TimelineStore};

use crate::config::HorizonConfig;
use crate::output::{format_table, index_rows};

/// Run the index command.
pub async fn run(config: &HorizonConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = TimelineStore::new(config.field_dir_path());
    let index = build_index(&store)?;

    println!("{}", store.index_path().display());
    if index.tags.is_empty() {
        println!("No snapshots found under {}", store.timeline_dir().display());
    } else {
        println!();
        println!("{}", format_table(&index_rows(&index.tags)));
    }
    println!("Chain root: {}", index.chain_root);

    Ok(())
}
