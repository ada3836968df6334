//! Full-table listings ordered by primary key.

use tracing::debug;

use crate::db::schema::{SchemaTable, ALL_TABLES};
use crate::db::{DatabaseBackend, DbError};
use crate::types::TableDump;

/// `SELECT` listing every row of `table` ordered by its key.
pub fn select_all_sql(table: &SchemaTable) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        table.column_names().join(", "),
        table.name,
        table.primary_key.join(", ")
    )
}

/// Dump one table. Fails if the table does not exist yet.
pub fn dump_table(db: &mut dyn DatabaseBackend, table: &SchemaTable) -> Result<TableDump, DbError> {
    if !db.table_exists(table.name)? {
        return Err(DbError::QueryFailed {
            message: format!("Table '{}' does not exist; run setup first", table.name),
        });
    }
    debug!(table = table.name, "dumping table");
    let result = db.query(&select_all_sql(table))?;
    Ok(TableDump::new(table.name, result))
}

/// Dump all seven tables in creation order.
pub fn dump_all(db: &mut dyn DatabaseBackend) -> Result<Vec<TableDump>, DbError> {
    ALL_TABLES.iter().map(|table| dump_table(db, table)).collect()
}
