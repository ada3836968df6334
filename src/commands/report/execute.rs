use std::error::Error;

use serde::Serialize;

use super::ReportCmd;
use crate::commands::Execute;
use crate::db::DatabaseConfig;
use crate::queries::report::{run_report, OwnerName, ReportOptions};
use crate::seed::MANAGER_ASSIGNMENT;
use crate::types::TableDump;

/// Result of the report command
#[derive(Debug, Serialize)]
pub struct ReportResult {
    pub owner: String,
    pub sections: Vec<TableDump>,
}

impl Execute for ReportCmd {
    type Output = ReportResult;

    fn execute(self, config: &DatabaseConfig) -> Result<Self::Output, Box<dyn Error>> {
        let owner = OwnerName::parse(&self.owner)?;
        let options = ReportOptions {
            owner,
            assignment: MANAGER_ASSIGNMENT,
        };

        let mut db = config.connect()?;
        for table in ["Owner", "Pet", "Position", "Staff", "Clinic"] {
            if !db.table_exists(table)? {
                return Err(format!("Table '{}' does not exist; run setup first", table).into());
            }
        }

        let sections = run_report(db.as_mut(), &options)?;
        Ok(ReportResult {
            owner: options.owner.display_name(),
            sections,
        })
    }
}
