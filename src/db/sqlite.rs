//! SQLite backend built on `rusqlite`.

use std::path::Path;

use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ErrorCode};
use tracing::debug;

use super::backend::{DatabaseBackend, Dialect, QueryResult};
use super::value::Value;
use super::DbError;

/// SQLite backend, file-backed or in-memory.
///
/// Foreign-key enforcement is switched on when the connection opens. SQLite
/// ignores `PRAGMA foreign_keys` inside a transaction, so suspension during a
/// bootstrap uses `PRAGMA defer_foreign_keys` instead: checks are postponed,
/// not skipped.
pub struct SqliteBackend {
    conn: Connection,
    in_memory: bool,
}

impl SqliteBackend {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path).map_err(|e| DbError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::with_connection(conn, false)
    }

    /// Create an in-memory database.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::OpenFailed {
            path: ":memory:".to_string(),
            message: e.to_string(),
        })?;
        Self::with_connection(conn, true)
    }

    fn with_connection(conn: Connection, in_memory: bool) -> Result<Self, DbError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(map_error)?;
        Ok(Self { conn, in_memory })
    }

    fn set_deferred(&mut self, deferred: bool) -> Result<(), DbError> {
        if let Some(pragma) = Dialect::Sqlite.defer_foreign_keys_sql(deferred) {
            debug!(pragma, "foreign keys");
            self.conn.execute_batch(pragma).map_err(map_error)?;
        }
        Ok(())
    }
}

impl DatabaseBackend for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        if self.in_memory {
            "SqliteMem"
        } else {
            "Sqlite"
        }
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str) -> Result<usize, DbError> {
        debug!(sql, "execute");
        self.conn.execute(sql, []).map_err(map_error)
    }

    fn query(&mut self, sql: &str) -> Result<QueryResult, DbError> {
        debug!(sql, "query");
        let mut stmt = self.conn.prepare(sql).map_err(map_error)?;
        let headers: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = headers.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([]).map_err(map_error)?;
        while let Some(row) = cursor.next().map_err(map_error)? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(read_value(row.get_ref(idx).map_err(map_error)?));
            }
            rows.push(values);
        }

        Ok(QueryResult { headers, rows })
    }

    fn insert_rows(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> Result<usize, DbError> {
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        );
        debug!(sql = sql.as_str(), rows = rows.len(), "insert");

        let mut stmt = self.conn.prepare(&sql).map_err(map_error)?;
        let mut inserted = 0;
        for row in rows {
            if row.len() != columns.len() {
                return Err(DbError::QueryFailed {
                    message: format!(
                        "Row for '{}' has {} values, expected {}",
                        table,
                        row.len(),
                        columns.len()
                    ),
                });
            }
            inserted += stmt.execute(params_from_iter(row.iter())).map_err(map_error)?;
        }
        Ok(inserted)
    }

    fn table_exists(&mut self, name: &str) -> Result<bool, DbError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
                [name],
                |row| row.get(0),
            )
            .map_err(map_error)?;
        Ok(count > 0)
    }

    fn suspend_foreign_keys(&mut self) -> Result<(), DbError> {
        self.set_deferred(true)
    }

    fn resume_foreign_keys(&mut self) -> Result<(), DbError> {
        self.set_deferred(false)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

fn read_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Text(format!("<blob {} bytes>", bytes.len())),
    }
}

fn map_error(e: rusqlite::Error) -> DbError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            DbError::ConstraintViolation {
                message: e.to_string(),
            }
        }
        _ => DbError::QueryFailed {
            message: e.to_string(),
        },
    }
}
