use std::error::Error;

use serde::Serialize;

use super::SetupCmd;
use crate::commands::Execute;
use crate::db::DatabaseConfig;
use crate::queries::bootstrap::{preview, run_bootstrap, BootstrapOptions, BootstrapReport, PlannedStep};

/// Result of the setup command
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub database: String,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan: Vec<PlannedStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BootstrapReport>,
}

impl Execute for SetupCmd {
    type Output = SetupResult;

    fn execute(self, config: &DatabaseConfig) -> Result<Self::Output, Box<dyn Error>> {
        let options = BootstrapOptions {
            skip_demo: self.skip_demo,
        };

        if self.dry_run {
            return Ok(SetupResult {
                database: config.to_string(),
                dry_run: true,
                plan: preview(&options, config.dialect()),
                report: None,
            });
        }

        let mut db = config.connect()?;
        let report = run_bootstrap(db.as_mut(), &options)?;

        Ok(SetupResult {
            database: config.to_string(),
            dry_run: false,
            plan: Vec::new(),
            report: Some(report),
        })
    }
}
