//! Execute tests for setup command.

#[cfg(test)]
mod tests {
    use super::super::SetupCmd;
    use crate::commands::Execute;
    use crate::db::{DatabaseConfig, PostgresConfig};
    use crate::test_utils::{row_count, sqlite_config};
    use rstest::rstest;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_dry_run_does_not_create_tables() {
        let db_file = NamedTempFile::new().unwrap();
        let config = sqlite_config(db_file.path());
        let cmd = SetupCmd {
            dry_run: true,
            skip_demo: false,
        };

        let result = cmd.execute(&config).unwrap();
        assert!(result.dry_run);
        assert!(result.report.is_none());
        assert_eq!(result.plan.first().unwrap().description, "Suspend foreign-key checks");

        let mut db = config.connect().unwrap();
        assert!(!db.table_exists("Clinic").unwrap());
    }

    #[rstest]
    fn test_dry_run_for_postgres_needs_no_server() {
        let config = DatabaseConfig::Postgres(PostgresConfig {
            host: Some("unreachable.invalid".to_string()),
            ..PostgresConfig::default()
        });
        let cmd = SetupCmd {
            dry_run: true,
            skip_demo: true,
        };

        let result = cmd.execute(&config).unwrap();
        let statements: Vec<&String> = result.plan.iter().flat_map(|p| p.statements.iter()).collect();
        assert!(statements.iter().any(|s| s.starts_with("DROP TABLE IF EXISTS Staff CASCADE")));
        assert!(statements.iter().any(|s| s.starts_with("ALTER TABLE Clinic ADD CONSTRAINT")));
    }

    #[rstest]
    fn test_setup_seeds_file_database() {
        let db_file = NamedTempFile::new().unwrap();
        let config = sqlite_config(db_file.path());
        let cmd = SetupCmd {
            dry_run: false,
            skip_demo: false,
        };

        let result = cmd.execute(&config).unwrap();
        let report = result.report.unwrap();
        assert_eq!(report.backend, "Sqlite");
        assert_eq!(report.mutations.len(), 2);

        assert_eq!(row_count(&config, "Owner"), 7);
        assert_eq!(row_count(&config, "Pet"), 7);
    }

    #[rstest]
    fn test_setup_twice_gives_same_counts() {
        let db_file = NamedTempFile::new().unwrap();
        let config = sqlite_config(db_file.path());

        for _ in 0..2 {
            SetupCmd {
                dry_run: false,
                skip_demo: true,
            }
            .execute(&config)
            .unwrap();
        }

        assert_eq!(row_count(&config, "Owner"), 6);
        assert_eq!(row_count(&config, "Staff"), 10);
    }
}
