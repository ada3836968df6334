use std::error::Error;

use serde::Serialize;

use super::DumpCmd;
use crate::commands::Execute;
use crate::db::schema::{table_by_name, table_names};
use crate::db::DatabaseConfig;
use crate::queries::dump::{dump_all, dump_table};
use crate::types::TableDump;

/// Result of the dump command
#[derive(Debug, Serialize)]
pub struct DumpResult {
    pub tables: Vec<TableDump>,
}

impl Execute for DumpCmd {
    type Output = DumpResult;

    fn execute(self, config: &DatabaseConfig) -> Result<Self::Output, Box<dyn Error>> {
        let selected = match &self.table {
            Some(name) => Some(table_by_name(name).ok_or_else(|| {
                format!(
                    "Unknown table '{}'. Expected one of: {}",
                    name,
                    table_names().join(", ")
                )
            })?),
            None => None,
        };

        let mut db = config.connect()?;
        let tables = match selected {
            Some(table) => vec![dump_table(db.as_mut(), table)?],
            None => dump_all(db.as_mut())?,
        };

        Ok(DumpResult { tables })
    }
}
