//! SQL DDL compiler.
//!
//! Generates `CREATE TABLE`, `DROP TABLE` and `ALTER TABLE ... ADD CONSTRAINT`
//! statements from the backend-agnostic definitions. Output is deterministic:
//! columns, then the primary key, uniques, checks and foreign keys in
//! declaration order.

use crate::db::backend::Dialect;
use crate::db::schema::definition::{OnDelete, SchemaForeignKey, SchemaTable, SchemaUnique};

/// Which constraints a `CREATE TABLE` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Without the deferred constraints; used while the other side of a
    /// reference cycle is still empty.
    Initial,
    /// With every constraint the finished table has.
    Final,
}

/// Compiler for generating SQL DDL from schema definitions.
pub struct DdlCompiler;

impl DdlCompiler {
    /// Generate a `CREATE TABLE` statement.
    ///
    /// Produces output in the format:
    /// ```sql
    /// CREATE TABLE Pet (
    ///     petNo VARCHAR(6) NOT NULL,
    ///     color VARCHAR(50),
    ///     PRIMARY KEY (petNo),
    ///     CONSTRAINT fk_pet_owner FOREIGN KEY (ownerNo) REFERENCES Owner (ownerNo) ON DELETE CASCADE
    /// )
    /// ```
    pub fn compile_create_table(table: &SchemaTable, phase: Phase, dialect: Dialect) -> String {
        let mut lines: Vec<String> = table
            .columns
            .iter()
            .map(|col| {
                let mut line = format!("    {} {}", col.name, dialect.type_name(col.data_type));
                if !col.nullable {
                    line.push_str(" NOT NULL");
                }
                if let Some(default) = col.default {
                    line.push_str(&format!(" DEFAULT {}", default));
                }
                line
            })
            .collect();

        lines.push(format!("    PRIMARY KEY ({})", table.primary_key.join(", ")));

        let uniques: Vec<&SchemaUnique> = match phase {
            Phase::Initial => table.uniques.iter().collect(),
            Phase::Final => table.all_uniques().collect(),
        };
        for unique in uniques {
            lines.push(format!("    {}", unique_clause(unique)));
        }

        for check in table.checks {
            lines.push(format!(
                "    CONSTRAINT {} CHECK ({})",
                check.name, check.expression
            ));
        }

        let foreign_keys: Vec<&SchemaForeignKey> = match phase {
            Phase::Initial => table.foreign_keys.iter().collect(),
            Phase::Final => table.all_foreign_keys().collect(),
        };
        for fk in foreign_keys {
            lines.push(format!("    {}", foreign_key_clause(fk)));
        }

        format!("CREATE TABLE {} (\n{}\n)", table.name, lines.join(",\n"))
    }

    /// Generate a `DROP TABLE IF EXISTS` statement.
    ///
    /// PostgreSQL gets `CASCADE` so leftover constraints from other tables do
    /// not block the drop.
    pub fn compile_drop_table(table_name: &str, dialect: Dialect) -> String {
        if dialect.supports_drop_cascade() {
            format!("DROP TABLE IF EXISTS {} CASCADE", table_name)
        } else {
            format!("DROP TABLE IF EXISTS {}", table_name)
        }
    }

    pub fn compile_add_unique(table_name: &str, unique: &SchemaUnique) -> String {
        format!("ALTER TABLE {} ADD {}", table_name, unique_clause(unique))
    }

    pub fn compile_add_foreign_key(table_name: &str, fk: &SchemaForeignKey) -> String {
        format!("ALTER TABLE {} ADD {}", table_name, foreign_key_clause(fk))
    }
}

fn unique_clause(unique: &SchemaUnique) -> String {
    format!("CONSTRAINT {} UNIQUE ({})", unique.name, unique.columns.join(", "))
}

fn foreign_key_clause(fk: &SchemaForeignKey) -> String {
    let mut clause = format!(
        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        fk.name,
        fk.columns.join(", "),
        fk.ref_table,
        fk.ref_columns.join(", ")
    );
    if fk.on_delete == OnDelete::Cascade {
        clause.push_str(" ON DELETE CASCADE");
    }
    clause
}
