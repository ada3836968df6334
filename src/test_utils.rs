//! Shared test utilities for execute tests.

use std::path::Path;

use tempfile::NamedTempFile;

use crate::db::DatabaseConfig;
use crate::queries::bootstrap::{run_bootstrap, BootstrapOptions};

/// Configuration pointing at a SQLite file.
pub fn sqlite_config(path: &Path) -> DatabaseConfig {
    DatabaseConfig::Sqlite {
        path: path.to_path_buf(),
    }
}

/// Create a temporary SQLite file and run the bootstrap against it.
///
/// The file is removed when the returned handle is dropped.
pub fn seeded_db_file(skip_demo: bool) -> NamedTempFile {
    let db_file = NamedTempFile::new().expect("Failed to create temp db file");
    let mut db = sqlite_config(db_file.path())
        .connect()
        .expect("Failed to open temp db");
    run_bootstrap(db.as_mut(), &BootstrapOptions { skip_demo }).expect("Bootstrap should succeed");
    db_file
}

/// Count the rows of `table` through a fresh connection.
pub fn row_count(config: &DatabaseConfig, table: &str) -> i64 {
    let mut db = config.connect().expect("Failed to open db");
    let result = db
        .query(&format!("SELECT COUNT(*) FROM {}", table))
        .expect("Count query failed");
    result
        .scalar()
        .and_then(|v| v.as_i64())
        .expect("Count should be an integer")
}
