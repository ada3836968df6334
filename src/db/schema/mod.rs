//! Backend-agnostic database schema definitions.
//!
//! The seven clinic tables are declared once and compiled to SQLite or
//! PostgreSQL DDL on demand.
//!
//! # Overview
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `DataType` - column types (Code, Name, Address, Decimal, Phone, Date)
//!    - `SchemaColumn`, `SchemaForeignKey`, `SchemaUnique`, `SchemaCheck`
//!    - `SchemaTable` - a complete table, including its deferred constraints
//!
//! 2. **Table Definitions** (`tables.rs`):
//!    - `POSITION`, `CLINIC`, `STAFF`, `ANIMAL`, `OWNER`, `PET`, `EXAMINATION`
//!    - `ALL_TABLES` in creation order, `RESET_ORDER` in drop order
//!
//! 3. **DDL** (`compiler.rs`, `swap.rs`):
//!    - `DdlCompiler` - CREATE / DROP / ALTER statements
//!    - `finish_statements` - backup-swap on SQLite, ADD CONSTRAINT on PostgreSQL
//!
//! # Type Mapping
//!
//! | DataType | SQLite | PostgreSQL |
//! |----------|--------|------------|
//! | Code | VARCHAR(6) | VARCHAR(6) |
//! | Name | VARCHAR(50) | VARCHAR(50) |
//! | Address | VARCHAR(100) | VARCHAR(100) |
//! | Decimal | DECIMAL(10,2) | NUMERIC(10,2) |
//! | Phone | BIGINT | BIGINT |
//! | Date | DATE | DATE |

mod compiler;
mod definition;
mod swap;
mod tables;

pub use compiler::{DdlCompiler, Phase};
pub use definition::{
    DataType, OnDelete, SchemaCheck, SchemaColumn, SchemaForeignKey, SchemaTable, SchemaUnique,
};
pub use swap::{backup_swap_statements, backup_table_name, constraint_statements, finish_statements};
pub use tables::{
    table_by_name, table_names, ALL_TABLES, ANIMAL, CLINIC, EXAMINATION, OWNER, PET, POSITION,
    RESET_ORDER, STAFF,
};
