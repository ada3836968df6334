//! Core schema definition types.
//!
//! Provides a backend-agnostic description of tables, keys and constraints.
//! These types drive DDL compilation for both SQLite and PostgreSQL as well as
//! the integrity checks, so every constraint is declared exactly once.

/// Represents a column data type.
///
/// Maps to both dialects via `sqlite_type()` and `postgres_type()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Six character entity code (e.g. `S00001`)
    Code,
    /// Short free text (names, species, colors)
    Name,
    /// Long free text (addresses, descriptions)
    Address,
    /// Money amount with two decimals
    Decimal,
    /// Ten digit telephone number
    Phone,
    /// Calendar date, ISO-8601 text on SQLite
    Date,
}

impl DataType {
    /// Returns the SQLite type name for this data type.
    pub fn sqlite_type(&self) -> &'static str {
        match self {
            DataType::Code => "VARCHAR(6)",
            DataType::Name => "VARCHAR(50)",
            DataType::Address => "VARCHAR(100)",
            DataType::Decimal => "DECIMAL(10,2)",
            DataType::Phone => "BIGINT",
            DataType::Date => "DATE",
        }
    }

    /// Returns the PostgreSQL type name for this data type.
    pub fn postgres_type(&self) -> &'static str {
        match self {
            DataType::Code => "VARCHAR(6)",
            DataType::Name => "VARCHAR(50)",
            DataType::Address => "VARCHAR(100)",
            DataType::Decimal => "NUMERIC(10,2)",
            DataType::Phone => "BIGINT",
            DataType::Date => "DATE",
        }
    }
}

/// Represents a column of a table.
#[derive(Debug, Clone)]
pub struct SchemaColumn {
    pub name: &'static str,
    pub data_type: DataType,
    pub nullable: bool,
    /// Default as a SQL literal (e.g. `'S00000'`). None means no default.
    pub default: Option<&'static str>,
}

/// What happens to referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    NoAction,
    Cascade,
}

/// A foreign key from `columns` to `ref_table(ref_columns)`.
#[derive(Debug, Clone)]
pub struct SchemaForeignKey {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub ref_table: &'static str,
    pub ref_columns: &'static [&'static str],
    pub on_delete: OnDelete,
}

/// A uniqueness constraint.
#[derive(Debug, Clone)]
pub struct SchemaUnique {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// A check constraint; `expression` is dialect-neutral SQL.
#[derive(Debug, Clone)]
pub struct SchemaCheck {
    pub name: &'static str,
    pub expression: &'static str,
}

/// Represents a complete table.
///
/// `deferred_uniques` and `deferred_foreign_keys` are constraints that cannot
/// exist when the table is first created because they close a reference cycle.
/// They are left out of the initial DDL and added once both sides of the cycle
/// hold their rows.
#[derive(Debug, Clone)]
pub struct SchemaTable {
    pub name: &'static str,
    pub columns: &'static [SchemaColumn],
    pub primary_key: &'static [&'static str],
    pub uniques: &'static [SchemaUnique],
    pub checks: &'static [SchemaCheck],
    pub foreign_keys: &'static [SchemaForeignKey],
    pub deferred_uniques: &'static [SchemaUnique],
    pub deferred_foreign_keys: &'static [SchemaForeignKey],
}

impl SchemaTable {
    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Every foreign key the finished table carries.
    pub fn all_foreign_keys(&self) -> impl Iterator<Item = &SchemaForeignKey> {
        self.foreign_keys.iter().chain(self.deferred_foreign_keys.iter())
    }

    /// Every uniqueness constraint the finished table carries.
    pub fn all_uniques(&self) -> impl Iterator<Item = &SchemaUnique> {
        self.uniques.iter().chain(self.deferred_uniques.iter())
    }

    /// Whether this table takes part in a reference cycle.
    pub fn has_deferred_constraints(&self) -> bool {
        !self.deferred_uniques.is_empty() || !self.deferred_foreign_keys.is_empty()
    }

    /// Look up a column by name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<&SchemaColumn> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Tables this one references once complete, without duplicates.
    pub fn referenced_tables(&self) -> Vec<&'static str> {
        let mut tables: Vec<&'static str> = Vec::new();
        for fk in self.all_foreign_keys() {
            if !tables.contains(&fk.ref_table) {
                tables.push(fk.ref_table);
            }
        }
        tables
    }
}
