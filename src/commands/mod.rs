//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` running it against a resolved `DatabaseConfig`
//! - `output.rs` rendering its result as a table

mod dump;
mod report;
mod setup;
mod verify;

pub use dump::DumpCmd;
pub use report::ReportCmd;
pub use setup::SetupCmd;
pub use verify::{VerifyCmd, VerifyError};

use clap::Subcommand;
use std::error::Error;

use crate::db::DatabaseConfig;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, config: &DatabaseConfig) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reset, create and seed the clinic schema
    Setup(SetupCmd),

    /// Print the rows of one table or of all tables
    Dump(DumpCmd),

    /// Run the demonstration queries
    Report(ReportCmd),

    /// Check referential and domain integrity of the current database
    Verify(VerifyCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &DatabaseConfig, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Setup(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Dump(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Report(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Verify(cmd) => {
                let result = cmd.execute(config)?;
                let output = result.format(format);
                if result.report.is_clean() {
                    Ok(output)
                } else {
                    Err(Box::new(VerifyError::ChecksFailed {
                        failed: result.report.failed_count(),
                        output,
                    }))
                }
            }
        }
    }
}
