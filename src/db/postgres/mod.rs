//! PostgreSQL backend implementation.
//!
//! PostgreSQL can add foreign keys and uniqueness constraints to populated
//! tables in place, so the circular Clinic/Staff pair is finished with
//! `ALTER TABLE ... ADD CONSTRAINT` rather than a backup-swap.

mod conversion;

use ::postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::debug;

use super::backend::{DatabaseBackend, Dialect, QueryResult};
use super::escape::values_tuple;
use super::value::Value;
use super::DbError;

use conversion::{convert_cell, CellKind};

/// Rows per multi-row `INSERT` statement.
const CHUNK_SIZE: usize = 500;

/// PostgreSQL backend using the synchronous `postgres` client.
pub struct PostgresBackend {
    client: Client,
}

impl PostgresBackend {
    /// Connect to PostgreSQL.
    ///
    /// # Arguments
    /// * `connection_string` - libpq style key/value string or `postgres://` URL
    ///
    /// # Example
    /// ```no_run
    /// use vet_clinic::db::PostgresBackend;
    /// let backend = PostgresBackend::new("host=localhost user=postgres dbname=vet_clinic")?;
    /// # Ok::<(), vet_clinic::db::DbError>(())
    /// ```
    pub fn new(connection_string: &str) -> Result<Self, DbError> {
        let client = Client::connect(connection_string, NoTls).map_err(|e| DbError::OpenFailed {
            path: redact(connection_string),
            message: e.to_string(),
        })?;
        Ok(Self { client })
    }
}

impl DatabaseBackend for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        "Postgres"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn execute(&mut self, sql: &str) -> Result<usize, DbError> {
        debug!(sql, "execute");
        let changed = self.client.execute(sql, &[]).map_err(map_error)?;
        Ok(changed as usize)
    }

    fn query(&mut self, sql: &str) -> Result<QueryResult, DbError> {
        debug!(sql, "query");
        let statement = self.client.prepare(sql).map_err(map_error)?;
        let headers: Vec<String> = statement.columns().iter().map(|c| c.name().to_string()).collect();
        let kinds: Vec<CellKind> = statement.columns().iter().map(|c| CellKind::for_type(c.type_())).collect();

        let mut rows = Vec::new();
        for message in self.client.simple_query(sql).map_err(map_error)? {
            if let SimpleQueryMessage::Row(row) = message {
                let values = kinds
                    .iter()
                    .enumerate()
                    .map(|(idx, kind)| convert_cell(row.get(idx), *kind))
                    .collect();
                rows.push(values);
            }
        }

        Ok(QueryResult { headers, rows })
    }

    fn insert_rows(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> Result<usize, DbError> {
        if let Some(bad) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(DbError::QueryFailed {
                message: format!(
                    "Row for '{}' has {} values, expected {}",
                    table,
                    bad.len(),
                    columns.len()
                ),
            });
        }

        let mut total_inserted = 0;
        for chunk in rows.chunks(CHUNK_SIZE) {
            let tuples: Vec<String> = chunk.iter().map(|row| values_tuple(row)).collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES {}",
                table,
                columns.join(", "),
                tuples.join(", ")
            );
            total_inserted += self.execute(&sql)?;
        }
        Ok(total_inserted)
    }

    fn table_exists(&mut self, name: &str) -> Result<bool, DbError> {
        let rows = self
            .client
            .query(
                "SELECT 1 FROM information_schema.tables \
                 WHERE table_schema = current_schema() AND lower(table_name) = lower($1)",
                &[&name],
            )
            .map_err(map_error)?;
        Ok(!rows.is_empty())
    }

    fn begin(&mut self) -> Result<(), DbError> {
        self.client.batch_execute("BEGIN").map_err(map_error)
    }

    fn commit(&mut self) -> Result<(), DbError> {
        self.client.batch_execute("COMMIT").map_err(map_error)
    }

    fn rollback(&mut self) -> Result<(), DbError> {
        self.client.batch_execute("ROLLBACK").map_err(map_error)
    }

    // Constraints are only added once both sides are populated, and each
    // ALTER TABLE validates existing rows, so nothing needs suspending.
    fn suspend_foreign_keys(&mut self) -> Result<(), DbError> {
        debug!("foreign key suspension is a no-op on PostgreSQL");
        Ok(())
    }

    fn resume_foreign_keys(&mut self) -> Result<(), DbError> {
        Ok(())
    }
}

fn map_error(e: ::postgres::Error) -> DbError {
    // SQLSTATE class 23: integrity constraint violation
    let is_constraint = e.code().is_some_and(|state| state.code().starts_with("23"));
    let message = match e.as_db_error() {
        Some(db) => db.message().to_string(),
        None => e.to_string(),
    };
    if is_constraint {
        DbError::ConstraintViolation { message }
    } else {
        DbError::QueryFailed { message }
    }
}

/// Strip a password from a connection string before it lands in an error.
fn redact(connection_string: &str) -> String {
    connection_string
        .split_whitespace()
        .map(|part| {
            if part.starts_with("password=") {
                "password=***"
            } else {
                part
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_password() {
        assert_eq!(
            redact("host=localhost user=vet password=secret dbname=clinic"),
            "host=localhost user=vet password=*** dbname=clinic"
        );
    }

    #[test]
    fn test_redact_without_password() {
        assert_eq!(redact("host=localhost"), "host=localhost");
    }
}
