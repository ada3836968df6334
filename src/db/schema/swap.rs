//! Statements that finish a table whose constraints were deferred.
//!
//! SQLite cannot add a foreign key or uniqueness constraint to an existing
//! table, so the table is rebuilt through a temporary backup:
//!
//! 1. copy every row into `<table>_backup`
//! 2. drop the table
//! 3. recreate it with its final constraints
//! 4. copy the rows back
//! 5. drop the backup
//!
//! PostgreSQL adds the constraints in place.

use crate::db::backend::Dialect;
use crate::db::schema::compiler::{DdlCompiler, Phase};
use crate::db::schema::definition::SchemaTable;

/// Name of the temporary table holding a copy of `table` during a swap.
pub fn backup_table_name(table: &SchemaTable) -> String {
    format!("{}_backup", table.name)
}

/// The five backup-swap statements for `table`, in execution order.
pub fn backup_swap_statements(table: &SchemaTable) -> Vec<String> {
    let backup = backup_table_name(table);
    let columns = table.column_names().join(", ");
    vec![
        format!(
            "CREATE TEMPORARY TABLE {} AS SELECT {} FROM {}",
            backup, columns, table.name
        ),
        format!("DROP TABLE {}", table.name),
        DdlCompiler::compile_create_table(table, Phase::Final, Dialect::Sqlite),
        format!(
            "INSERT INTO {} ({}) SELECT {} FROM {}",
            table.name, columns, columns, backup
        ),
        format!("DROP TABLE {}", backup),
    ]
}

/// `ALTER TABLE` statements adding every deferred constraint of `table`.
pub fn constraint_statements(table: &SchemaTable) -> Vec<String> {
    let uniques = table
        .deferred_uniques
        .iter()
        .map(|unique| DdlCompiler::compile_add_unique(table.name, unique));
    let foreign_keys = table
        .deferred_foreign_keys
        .iter()
        .map(|fk| DdlCompiler::compile_add_foreign_key(table.name, fk));
    uniques.chain(foreign_keys).collect()
}

/// Statements that bring `table` to its final shape on `dialect`.
pub fn finish_statements(table: &SchemaTable, dialect: Dialect) -> Vec<String> {
    if dialect.supports_add_constraint() {
        constraint_statements(table)
    } else {
        backup_swap_statements(table)
    }
}
