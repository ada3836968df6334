//! Bootstrap tests against a live PostgreSQL server.
//!
//! Run with: cargo test --features postgres-tests
//!
//! Prerequisites:
//! 1. A reachable PostgreSQL instance
//! 2. `createdb -U postgres vet_clinic_test`, or `PG_TEST_URL` pointing elsewhere
//!
//! The tests drop and recreate the clinic tables in that database.

#![cfg(feature = "postgres-tests")]

use serial_test::serial;

use vet_clinic::db::{DatabaseBackend, DbError, PostgresBackend, Value};
use vet_clinic::queries::bootstrap::{run_bootstrap, BootstrapOptions};
use vet_clinic::queries::dump::dump_all;
use vet_clinic::queries::integrity::run_checks;
use vet_clinic::queries::report::{run_report, OwnerName, ReportOptions};
use vet_clinic::seed::MANAGER_ASSIGNMENT;

const DEFAULT_CONNECTION: &str = "host=localhost user=postgres dbname=vet_clinic_test";

fn connect() -> PostgresBackend {
    let conn = std::env::var("PG_TEST_URL").unwrap_or_else(|_| DEFAULT_CONNECTION.to_string());
    PostgresBackend::new(&conn).expect("PostgreSQL should be reachable")
}

fn bootstrapped(skip_demo: bool) -> PostgresBackend {
    let mut db = connect();
    run_bootstrap(&mut db, &BootstrapOptions { skip_demo }).expect("bootstrap should succeed");
    db
}

#[test]
#[serial]
fn test_bootstrap_row_counts() {
    let mut db = bootstrapped(false);
    let counts: Vec<usize> = dump_all(&mut db)
        .expect("dump")
        .iter()
        .map(|d| d.row_count())
        .collect();
    assert_eq!(counts, vec![5, 6, 7, 5, 10, 7, 6]);
}

#[test]
#[serial]
fn test_bootstrap_is_repeatable() {
    let first = dump_all(&mut bootstrapped(false)).expect("dump");
    let second = dump_all(&mut bootstrapped(false)).expect("dump");
    assert_eq!(first, second);
}

#[test]
#[serial]
fn test_integrity_clean_and_constraints_enforced() {
    let mut db = bootstrapped(false);
    assert!(run_checks(&mut db, true).expect("checks").is_clean());

    let err = db
        .execute("UPDATE Clinic SET manager = 'S00099' WHERE clinicNo = 'C00001'")
        .unwrap_err();
    assert!(matches!(err, DbError::ConstraintViolation { .. }), "{err}");

    let err = db
        .execute("UPDATE Position SET salary = 0 WHERE positionNo = 'J00001'")
        .unwrap_err();
    assert!(matches!(err, DbError::ConstraintViolation { .. }), "{err}");
}

#[test]
#[serial]
fn test_report_matches_sqlite() {
    let mut db = bootstrapped(false);
    let options = ReportOptions {
        owner: OwnerName::parse("Catherine Williams").expect("owner"),
        assignment: MANAGER_ASSIGNMENT,
    };
    let sections = run_report(&mut db, &options).expect("report");

    assert_eq!(sections[0].rows[0][0].as_i64(), Some(1));
    assert_eq!(
        sections[4].column("manager").expect("manager column"),
        vec![&Value::from("S00003")]
    );
}

#[test]
#[serial]
fn test_skip_demo_keeps_original_manager() {
    let mut db = bootstrapped(true);
    let result = db
        .query("SELECT manager FROM Clinic WHERE clinicNo = 'C00003'")
        .expect("query");
    assert_eq!(result.scalar(), Some(&Value::from("S00008")));
}
