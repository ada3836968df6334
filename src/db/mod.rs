//! Database access layer.
//!
//! This module provides everything the bootstrap needs from a database:
//! - Connection management (file-backed SQLite, in-memory SQLite, PostgreSQL)
//! - A `DatabaseBackend` session trait with explicit transaction control
//! - Backend-agnostic schema definitions and DDL compilation (`schema`)
//! - Backend-neutral `Value` cells and SQL literal rendering
//!
//! # Type Decisions
//!
//! **Why a `&mut dyn DatabaseBackend` instead of a global connection?**
//! The bootstrap is a single linear session: open, seed, commit, close. Passing
//! the handle explicitly makes that lifecycle visible at every call site and
//! lets tests run against in-memory databases side by side.
//!
//! **Why text SQL for PostgreSQL inserts instead of typed parameters?**
//! The seed data mixes dates, decimals and text that PostgreSQL happily
//! coerces from untyped literals, while typed binding would need a separate
//! conversion per column type.

mod backend;
mod config;
mod escape;
mod postgres;
pub mod schema;
mod sqlite;
mod value;

pub use backend::{DatabaseBackend, Dialect, QueryResult};
pub use config::{DatabaseConfig, PostgresConfig, DEFAULT_DB_PATH};
pub use escape::{like_contains, quote_literal, values_tuple};
pub use postgres::PostgresBackend;
pub use sqlite::SqliteBackend;
pub use value::Value;

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Table '{table}' changed during {step}: {expected} row(s) before, {found} after")]
    RowsLost {
        table: String,
        step: String,
        expected: usize,
        found: usize,
    },

    #[error("Integrity check failed: {}", violations.join("; "))]
    IntegrityCheckFailed { violations: Vec<String> },
}

/// Create an in-memory database instance.
///
/// Used for tests to avoid disk I/O and temp file management.
#[cfg(test)]
pub fn open_mem_db() -> SqliteBackend {
    SqliteBackend::open_in_memory().expect("Failed to create in-memory DB")
}
