// crates/horizon-cli/src/output.rs
//
// Output formatting utilities for the Horizon CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

use horizon_core::Layout;
use horizon_timeline::IndexEntry;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// One node of a layout.
#[derive(Tabled)]
pub struct LayoutRow {
    #[tabled(rename = "Node")]
    pub node: String,
    #[tabled(rename = "X")]
    pub x: String,
    #[tabled(rename = "Y")]
    pub y: String,
}

pub fn layout_rows(layout: &Layout, decimals: usize) -> Vec<LayoutRow> {
    layout
        .iter()
        .map(|(node, [x, y])| LayoutRow {
            node: node.to_string(),
            x: format!("{:.*}", decimals, x),
            y: format!("{:.*}", decimals, y),
        })
        .collect()
}

/// One entry of the timeline index.
#[derive(Tabled)]
pub struct IndexRow {
    #[tabled(rename = "Tag")]
    pub tag: String,
    #[tabled(rename = "Date (UTC)")]
    pub date: String,
    #[tabled(rename = "Phi")]
    pub phi: String,
    #[tabled(rename = "Snapshot SHA-256")]
    pub sha256: String,
}

pub fn index_rows(entries: &[IndexEntry]) -> Vec<IndexRow> {
    entries
        .iter()
        .map(|e| IndexRow {
            tag: e.tag.clone(),
            date: e.tag_date_utc.clone(),
            phi: format!("{:.4}", e.phi),
            sha256: e.snapshot_sha256.chars().take(16).collect(),
        })
        .collect()
}
