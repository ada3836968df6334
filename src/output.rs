//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use serde::Serialize;

use crate::types::TableDump;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

impl Outputable for TableDump {
    fn to_table(&self) -> String {
        format!("{}\n{}\n{}", self.title, "-".repeat(self.title.chars().count()), self.render_grid())
    }
}

/// Render several dumps one after another, separated by a blank line.
pub fn format_dumps(dumps: &[TableDump]) -> String {
    dumps
        .iter()
        .map(Outputable::to_table)
        .collect::<Vec<_>>()
        .join("\n\n")
}
