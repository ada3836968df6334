//! Database backend trait for abstracting the SQLite and PostgreSQL drivers.
//!
//! A backend is the explicit session handle of a run: it is opened once by
//! `DatabaseConfig::connect`, passed by `&mut` through every step, and closed
//! when dropped.

use serde::Serialize;

use super::value::Value;
use super::DbError;
use crate::db::schema::DataType;

/// SQL dialect spoken by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    /// Whether `ALTER TABLE ... ADD CONSTRAINT` can add a foreign key or
    /// uniqueness constraint to an existing table. SQLite cannot, so the
    /// circular pair goes through a backup-swap there.
    pub fn supports_add_constraint(&self) -> bool {
        match self {
            Dialect::Sqlite => false,
            Dialect::Postgres => true,
        }
    }

    /// Whether `DROP TABLE` accepts `CASCADE`.
    pub fn supports_drop_cascade(&self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Statement toggling deferred foreign-key checking, if the dialect
    /// needs one.
    pub fn defer_foreign_keys_sql(&self, deferred: bool) -> Option<&'static str> {
        match (self, deferred) {
            (Dialect::Sqlite, true) => Some("PRAGMA defer_foreign_keys = ON"),
            (Dialect::Sqlite, false) => Some("PRAGMA defer_foreign_keys = OFF"),
            (Dialect::Postgres, _) => None,
        }
    }

    /// Column type name for a schema data type.
    pub fn type_name(&self, data_type: DataType) -> &'static str {
        match self {
            Dialect::Sqlite => data_type.sqlite_type(),
            Dialect::Postgres => data_type.postgres_type(),
        }
    }
}

/// Result of a query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// First cell of the first row, if any. Handy for `COUNT(*)` style queries.
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }
}

/// Trait for database backends that can run the bootstrap.
pub trait DatabaseBackend {
    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Dialect used when compiling DDL for this backend.
    fn dialect(&self) -> Dialect;

    /// Execute a single statement that returns no rows.
    ///
    /// Returns the number of rows changed (0 for DDL).
    fn execute(&mut self, sql: &str) -> Result<usize, DbError>;

    /// Run a query and collect every row.
    fn query(&mut self, sql: &str) -> Result<QueryResult, DbError>;

    /// Insert rows into `table`, binding values positionally to `columns`.
    ///
    /// Returns the number of rows inserted. A constraint violation on any row
    /// aborts the whole call.
    fn insert_rows(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> Result<usize, DbError>;

    /// Check if a table exists (case-insensitive).
    fn table_exists(&mut self, name: &str) -> Result<bool, DbError>;

    /// Count the rows of a table.
    fn row_count(&mut self, table: &str) -> Result<usize, DbError> {
        let result = self.query(&format!("SELECT COUNT(*) FROM {}", table))?;
        result
            .scalar()
            .and_then(Value::as_i64)
            .map(|n| n as usize)
            .ok_or_else(|| DbError::QueryFailed {
                message: format!("COUNT(*) on '{}' returned no value", table),
            })
    }

    fn begin(&mut self) -> Result<(), DbError> {
        self.execute("BEGIN").map(|_| ())
    }

    fn commit(&mut self) -> Result<(), DbError> {
        self.execute("COMMIT").map(|_| ())
    }

    fn rollback(&mut self) -> Result<(), DbError> {
        self.execute("ROLLBACK").map(|_| ())
    }

    /// Stop checking foreign keys statement by statement until
    /// `resume_foreign_keys`. Must be called inside a transaction.
    fn suspend_foreign_keys(&mut self) -> Result<(), DbError>;

    /// Go back to immediate foreign-key checking.
    fn resume_foreign_keys(&mut self) -> Result<(), DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_result_scalar() {
        let result = QueryResult {
            headers: vec!["COUNT(*)".to_string()],
            rows: vec![vec![Value::Integer(6)]],
        };
        assert_eq!(result.scalar(), Some(&Value::Integer(6)));
        assert_eq!(QueryResult::default().scalar(), None);
    }

    #[test]
    fn test_dialect_constraint_support() {
        assert!(!Dialect::Sqlite.supports_add_constraint());
        assert!(Dialect::Postgres.supports_add_constraint());
        assert!(Dialect::Postgres.supports_drop_cascade());
    }

    #[test]
    fn test_defer_foreign_keys_sql() {
        assert_eq!(
            Dialect::Sqlite.defer_foreign_keys_sql(true),
            Some("PRAGMA defer_foreign_keys = ON")
        );
        assert_eq!(Dialect::Postgres.defer_foreign_keys_sql(false), None);
    }
}
