// crates/horizon-cli/src/commands/mod.rs
//
// Command module declarations for the Horizon CLI.

pub mod embed;
pub mod field;
pub mod index;
pub mod snapshot;
pub mod validate;
