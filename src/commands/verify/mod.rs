mod execute;
mod execute_tests;
mod output;

use clap::Args;
use thiserror::Error;

/// Check referential and domain integrity of the current database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  vet_clinic verify                          # Check ./test.db
  vet_clinic verify --db clinic.db -o json   # Check another file, JSON report

Exits with a non-zero status when any check fails.")]
pub struct VerifyCmd {}

/// Raised after the report is rendered when at least one check failed.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("{output}\n\n{failed} integrity check(s) failed")]
    ChecksFailed { failed: usize, output: String },
}
