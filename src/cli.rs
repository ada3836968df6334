//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database file, `:memory:`, `sqlite://path` or `postgres://` URL
    ///
    /// If not specified, the database is taken from:
    ///   1. .vet_clinic.json (working directory)
    ///   2. DATABASE_URL or VET_CLINIC_DB
    ///   3. ./test.db
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from(["vet_clinic", "dump", "--db", ":memory:", "-o", "json", "-vv"])
            .unwrap();
        assert_eq!(args.db.as_deref(), Some(":memory:"));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vet_clinic", "verify"]).unwrap();
        assert!(args.db.is_none());
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["vet_clinic"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["vet_clinic", "report", "-o", "xml"]).is_err());
    }
}
