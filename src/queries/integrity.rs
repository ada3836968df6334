//! Referential and domain integrity checks.
//!
//! Every check is derived from the schema definitions: one anti-join per
//! foreign key, one grouping query per uniqueness constraint and one filter
//! per check constraint. The same checks gate the bootstrap commit and back
//! the `verify` command.

use serde::Serialize;
use tracing::{debug, warn};

use crate::db::schema::{SchemaCheck, SchemaForeignKey, SchemaTable, SchemaUnique, ALL_TABLES};
use crate::db::{DatabaseBackend, DbError, Value};

/// Result of a single check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub name: String,
    pub description: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

impl CheckOutcome {
    fn new(name: impl Into<String>, description: String, violations: Vec<String>) -> Self {
        Self {
            name: name.into(),
            description,
            passed: violations.is_empty(),
            violations,
        }
    }
}

/// Outcome of a full integrity run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegrityReport {
    pub checks: Vec<CheckOutcome>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Every violation, prefixed with the name of its check.
    pub fn violations(&self) -> Vec<String> {
        self.checks
            .iter()
            .flat_map(|c| c.violations.iter().map(move |v| format!("{}: {}", c.name, v)))
            .collect()
    }
}

/// Anti-join listing rows of `table` whose `fk` target is missing.
///
/// Selects the child's key columns followed by the foreign key columns.
/// Rows with a NULL in any foreign key column are not references.
pub fn dangling_reference_sql(table: &SchemaTable, fk: &SchemaForeignKey) -> String {
    let selected: Vec<String> = table
        .primary_key
        .iter()
        .chain(fk.columns.iter())
        .map(|col| format!("c.{}", col))
        .collect();
    let join: Vec<String> = fk
        .columns
        .iter()
        .zip(fk.ref_columns.iter())
        .map(|(col, ref_col)| format!("c.{} = p.{}", col, ref_col))
        .collect();
    let not_null: Vec<String> = fk
        .columns
        .iter()
        .map(|col| format!("c.{} IS NOT NULL", col))
        .collect();

    format!(
        "SELECT {} FROM {} c LEFT JOIN {} p ON {} WHERE {} AND p.{} IS NULL",
        selected.join(", "),
        table.name,
        fk.ref_table,
        join.join(" AND "),
        not_null.join(" AND "),
        fk.ref_columns[0]
    )
}

/// Grouping query listing values that occur more than once.
pub fn duplicate_values_sql(table: &SchemaTable, unique: &SchemaUnique) -> String {
    let columns = unique.columns.join(", ");
    let not_null: Vec<String> = unique
        .columns
        .iter()
        .map(|col| format!("{} IS NOT NULL", col))
        .collect();
    format!(
        "SELECT {}, COUNT(*) AS occurrences FROM {} WHERE {} GROUP BY {} HAVING COUNT(*) > 1",
        columns,
        table.name,
        not_null.join(" AND "),
        columns
    )
}

/// Filter listing the keys of rows failing a check constraint.
pub fn failed_check_sql(table: &SchemaTable, check: &SchemaCheck) -> String {
    format!(
        "SELECT {} FROM {} WHERE NOT ({})",
        table.primary_key.join(", "),
        table.name,
        check.expression
    )
}

/// Run every check whose tables exist.
///
/// With `require_complete_schema`, a missing table is itself a failure;
/// otherwise checks touching it are skipped. The bootstrap uses the lenient
/// form while dependent tables are still to be created.
pub fn run_checks(
    db: &mut dyn DatabaseBackend,
    require_complete_schema: bool,
) -> Result<IntegrityReport, DbError> {
    let mut existing: Vec<&'static str> = Vec::new();
    let mut missing: Vec<String> = Vec::new();
    for table in ALL_TABLES {
        if db.table_exists(table.name)? {
            existing.push(table.name);
        } else {
            missing.push(format!("table {} is missing", table.name));
        }
    }

    let mut report = IntegrityReport::default();
    if require_complete_schema {
        report.checks.push(CheckOutcome::new(
            "tables_present",
            format!("all {} tables exist", ALL_TABLES.len()),
            missing,
        ));
    }

    for table in ALL_TABLES.iter().filter(|t| existing.contains(&t.name)) {
        for fk in table.all_foreign_keys() {
            if !existing.contains(&fk.ref_table) {
                debug!(check = fk.name, "skipped, {} not created yet", fk.ref_table);
                continue;
            }
            let result = db.query(&dangling_reference_sql(table, fk))?;
            let key_width = table.primary_key.len();
            let violations = result
                .rows
                .iter()
                .map(|row| {
                    format!(
                        "{} {}: ({}) = ({}) has no match in {}",
                        table.name,
                        join_values(&row[..key_width], "/"),
                        fk.columns.join(", "),
                        join_values(&row[key_width..], ", "),
                        fk.ref_table
                    )
                })
                .collect();
            report.checks.push(CheckOutcome::new(
                fk.name,
                format!(
                    "{}({}) references {}({})",
                    table.name,
                    fk.columns.join(", "),
                    fk.ref_table,
                    fk.ref_columns.join(", ")
                ),
                violations,
            ));
        }

        for unique in table.all_uniques() {
            let result = db.query(&duplicate_values_sql(table, unique))?;
            let width = unique.columns.len();
            let violations = result
                .rows
                .iter()
                .map(|row| {
                    format!(
                        "{}: ({}) = ({}) appears {} times",
                        table.name,
                        unique.columns.join(", "),
                        join_values(&row[..width], ", "),
                        row[width]
                    )
                })
                .collect();
            report.checks.push(CheckOutcome::new(
                unique.name,
                format!("non-null {}.({}) values are distinct", table.name, unique.columns.join(", ")),
                violations,
            ));
        }

        for check in table.checks {
            let result = db.query(&failed_check_sql(table, check))?;
            let violations = result
                .rows
                .iter()
                .map(|row| format!("{} {} violates {}", table.name, join_values(row, "/"), check.expression))
                .collect();
            report.checks.push(CheckOutcome::new(
                check.name,
                format!("{}: {}", table.name, check.expression),
                violations,
            ));
        }
    }

    Ok(report)
}

/// Run the lenient checks and fail on any violation.
pub fn enforce(db: &mut dyn DatabaseBackend) -> Result<IntegrityReport, DbError> {
    let report = run_checks(db, false)?;
    if report.is_clean() {
        debug!(checks = report.checks.len(), "integrity checks passed");
        Ok(report)
    } else {
        let violations = report.violations();
        warn!(count = violations.len(), "integrity checks failed");
        Err(DbError::IntegrityCheckFailed { violations })
    }
}

fn join_values(values: &[Value], separator: &str) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem_db;
    use crate::db::schema::{CLINIC, PET, POSITION};
    use crate::queries::bootstrap::{run_bootstrap, BootstrapOptions};
    use rstest::{fixture, rstest};

    #[fixture]
    fn seeded() -> crate::db::SqliteBackend {
        let mut db = open_mem_db();
        run_bootstrap(&mut db, &BootstrapOptions::default()).expect("bootstrap should succeed");
        db
    }

    #[test]
    fn test_dangling_reference_sql_composite() {
        let fk = &PET.foreign_keys[2];
        assert_eq!(
            dangling_reference_sql(&PET, fk),
            "SELECT c.petNo, c.species, c.breed FROM Pet c LEFT JOIN Animal p \
             ON c.species = p.species AND c.breed = p.breed \
             WHERE c.species IS NOT NULL AND c.breed IS NOT NULL AND p.species IS NULL"
        );
    }

    #[test]
    fn test_duplicate_values_sql() {
        assert_eq!(
            duplicate_values_sql(&CLINIC, &CLINIC.deferred_uniques[0]),
            "SELECT manager, COUNT(*) AS occurrences FROM Clinic WHERE manager IS NOT NULL \
             GROUP BY manager HAVING COUNT(*) > 1"
        );
    }

    #[test]
    fn test_failed_check_sql() {
        assert_eq!(
            failed_check_sql(&POSITION, &POSITION.checks[0]),
            "SELECT positionNo FROM Position WHERE NOT (salary > 0)"
        );
    }

    #[rstest]
    fn test_seeded_database_is_clean(mut seeded: crate::db::SqliteBackend) {
        let report = run_checks(&mut seeded, true).unwrap();
        assert!(report.is_clean(), "{:?}", report.violations());
        // tables_present + 8 foreign keys + 1 unique + 1 check
        assert_eq!(report.checks.len(), 11);
    }

    #[test]
    fn test_empty_database_reports_missing_tables() {
        let mut db = open_mem_db();
        let report = run_checks(&mut db, true).unwrap();
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].violations.len(), 7);
        assert!(run_checks(&mut db, false).unwrap().checks.is_empty());
    }

    #[rstest]
    fn test_detects_dangling_owner(mut seeded: crate::db::SqliteBackend) {
        seeded.execute("PRAGMA foreign_keys = OFF").unwrap();
        seeded
            .execute("UPDATE Pet SET ownerNo = 'O00099' WHERE petNo = 'P00001'")
            .unwrap();

        let report = run_checks(&mut seeded, true).unwrap();
        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            report.violations(),
            vec!["fk_pet_owner: Pet P00001: (ownerNo) = (O00099) has no match in Owner".to_string()]
        );
        assert!(matches!(
            enforce(&mut seeded),
            Err(DbError::IntegrityCheckFailed { .. })
        ));
    }

    #[rstest]
    fn test_detects_dangling_breed_pair(mut seeded: crate::db::SqliteBackend) {
        seeded.execute("PRAGMA foreign_keys = OFF").unwrap();
        seeded
            .execute("UPDATE Pet SET breed = 'Poodle' WHERE petNo = 'P00001'")
            .unwrap();

        let report = run_checks(&mut seeded, true).unwrap();
        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            report.violations(),
            vec![
                "fk_pet_animal: Pet P00001: (species, breed) = (Dog, Poodle) has no match in Animal"
                    .to_string()
            ]
        );
    }
}
