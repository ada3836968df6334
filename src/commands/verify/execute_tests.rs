//! Execute tests for verify command.

#[cfg(test)]
mod tests {
    use super::super::{VerifyCmd, VerifyError};
    use crate::commands::{Command, Execute};
    use crate::output::OutputFormat;
    use crate::test_utils::sqlite_config;
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    crate::seeded_db_fixture! {
        fixture_name: seeded_db,
        skip_demo: false,
    }

    crate::execute_test! {
        test_name: test_verify_seeded_database,
        fixture: seeded_db,
        cmd: VerifyCmd {},
        assertions: |result| {
            assert!(result.clean);
            assert_eq!(result.report.checks.len(), 11);
        },
    }

    #[rstest]
    fn test_verify_empty_database_reports_missing_tables() {
        let db_file = NamedTempFile::new().unwrap();
        let result = VerifyCmd {}.execute(&sqlite_config(db_file.path())).unwrap();
        assert!(!result.clean);
        assert_eq!(result.report.checks[0].name, "tables_present");
        assert_eq!(result.report.checks[0].violations.len(), 7);
    }

    #[rstest]
    fn test_run_fails_on_dangling_reference(seeded_db: NamedTempFile) {
        let config = sqlite_config(seeded_db.path());
        {
            let mut db = config.connect().unwrap();
            db.execute("PRAGMA foreign_keys = OFF").unwrap();
            db.execute("UPDATE Examination SET staffNo = 'S00099' WHERE examNo = 'E00001'")
                .unwrap();
        }

        let err = Command::Verify(VerifyCmd {})
            .run(&config, OutputFormat::Table)
            .unwrap_err();
        let err = err.downcast::<VerifyError>().unwrap();
        let VerifyError::ChecksFailed { failed, output } = *err;
        assert_eq!(failed, 1);
        assert!(output.contains("✗ fk_exam_staff"));
        assert!(output.contains("Examination E00001: (staffNo) = (S00099) has no match in Staff"));
    }

    #[rstest]
    fn test_run_succeeds_on_clean_database(seeded_db: NamedTempFile) {
        let output = Command::Verify(VerifyCmd {})
            .run(&sqlite_config(seeded_db.path()), OutputFormat::Table)
            .unwrap();
        assert!(output.ends_with("All 11 checks passed."));
    }

    #[rstest]
    fn test_run_fails_on_unknown_breed_pair(seeded_db: NamedTempFile) {
        let config = sqlite_config(seeded_db.path());
        {
            let mut db = config.connect().unwrap();
            db.execute("PRAGMA foreign_keys = OFF").unwrap();
            db.execute("UPDATE Pet SET breed = 'Poodle' WHERE petNo = 'P00001'")
                .unwrap();
        }

        let err = Command::Verify(VerifyCmd {})
            .run(&config, OutputFormat::Json)
            .unwrap_err();
        let err = err.downcast::<VerifyError>().unwrap();
        let VerifyError::ChecksFailed { failed, output } = *err;
        assert_eq!(failed, 1);
        assert!(output.contains("(species, breed) = (Dog, Poodle) has no match in Animal"));
    }
}
