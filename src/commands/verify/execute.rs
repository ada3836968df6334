use std::error::Error;

use serde::Serialize;

use super::VerifyCmd;
use crate::commands::Execute;
use crate::db::DatabaseConfig;
use crate::queries::integrity::{run_checks, IntegrityReport};

/// Result of the verify command
#[derive(Debug, Serialize)]
pub struct VerifyResult {
    pub database: String,
    pub clean: bool,
    pub report: IntegrityReport,
}

impl Execute for VerifyCmd {
    type Output = VerifyResult;

    fn execute(self, config: &DatabaseConfig) -> Result<Self::Output, Box<dyn Error>> {
        let mut db = config.connect()?;
        let report = run_checks(db.as_mut(), true)?;

        Ok(VerifyResult {
            database: config.to_string(),
            clean: report.is_clean(),
            report,
        })
    }
}
