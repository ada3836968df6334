//! Demonstration queries over the seeded clinic database.

use tracing::debug;

use crate::db::{like_contains, quote_literal, DatabaseBackend, DbError, Value};
use crate::seed::ManagerAssignment;
use crate::types::TableDump;

/// Owner first and last name, matched by substring.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerName {
    pub first: String,
    pub last: String,
}

impl OwnerName {
    /// Split "First Last" at the first whitespace. A single word matches the
    /// first name with any last name.
    pub fn parse(full_name: &str) -> Result<Self, String> {
        let mut parts = full_name.split_whitespace();
        let first = parts.next().ok_or("Owner name is empty")?.to_string();
        let last = parts.collect::<Vec<_>>().join(" ");
        Ok(Self { first, last })
    }

    pub fn display_name(&self) -> String {
        if self.last.is_empty() {
            self.first.clone()
        } else {
            format!("{} {}", self.first, self.last)
        }
    }

    /// Column heading, e.g. `Catherine Williams' No. of Pets`.
    pub fn pet_count_heading(&self) -> String {
        let name = self.display_name();
        if name.ends_with('s') {
            format!("{}' No. of Pets", name)
        } else {
            format!("{}'s No. of Pets", name)
        }
    }
}

/// Owner numbers matching `owner`.
pub fn owner_lookup_sql(owner: &OwnerName) -> String {
    format!(
        "SELECT ownerNo FROM Owner WHERE ownerFName LIKE {} AND ownerLName LIKE {} ORDER BY ownerNo",
        like_contains(&owner.first),
        like_contains(&owner.last)
    )
}

/// Pet count for the owner `owner_no`, headed after `owner`.
pub fn pet_count_sql(owner: &OwnerName, owner_no: &str) -> String {
    format!(
        "SELECT COUNT(*) AS \"{}\" FROM Pet WHERE ownerNo = {}",
        owner.pet_count_heading().replace('"', "\"\""),
        quote_literal(&Value::from(owner_no))
    )
}

/// Resolve `owner` to a single owner number.
fn resolve_owner(db: &mut dyn DatabaseBackend, owner: &OwnerName) -> Result<String, DbError> {
    let result = db.query(&owner_lookup_sql(owner))?;
    match result.rows.as_slice() {
        [row] => Ok(row[0].to_string()),
        rows => Err(DbError::QueryFailed {
            message: format!(
                "Expected exactly one owner matching '{}', found {}",
                owner.display_name(),
                rows.len()
            ),
        }),
    }
}

pub const AVERAGE_SALARY_SQL: &str =
    "SELECT positionName, AVG(salary) AS averageSalary FROM Position \
     GROUP BY positionName ORDER BY positionName";

pub const PETS_PER_CLINIC_SQL: &str =
    "SELECT clinicNo, COUNT(*) AS petCounter FROM Pet GROUP BY clinicNo ORDER BY clinicNo";

/// Staff rows matching the assignment's staff name.
pub fn staff_lookup_sql(assignment: &ManagerAssignment) -> String {
    format!(
        "SELECT * FROM Staff WHERE staffFName LIKE {} AND staffLName LIKE {} ORDER BY staffNo",
        like_contains(assignment.staff_first_name),
        like_contains(assignment.staff_last_name)
    )
}

/// Clinic rows whose address contains the assignment's fragment.
pub fn clinic_lookup_sql(assignment: &ManagerAssignment) -> String {
    format!(
        "SELECT * FROM Clinic WHERE clinicAddress LIKE {} ORDER BY clinicNo",
        like_contains(assignment.clinic_address_fragment)
    )
}

/// Options for a report run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub owner: OwnerName,
    pub assignment: ManagerAssignment,
}

/// Run every demonstration query in order.
pub fn run_report(
    db: &mut dyn DatabaseBackend,
    options: &ReportOptions,
) -> Result<Vec<TableDump>, DbError> {
    let assignment = &options.assignment;
    let owner_no = resolve_owner(db, &options.owner)?;
    let queries = [
        (
            format!("Pets owned by {}", options.owner.display_name()),
            pet_count_sql(&options.owner, &owner_no),
        ),
        ("Average salary per position".to_string(), AVERAGE_SALARY_SQL.to_string()),
        ("Pets per clinic".to_string(), PETS_PER_CLINIC_SQL.to_string()),
        (
            format!(
                "Staff named {} {}",
                assignment.staff_first_name, assignment.staff_last_name
            ),
            staff_lookup_sql(assignment),
        ),
        (
            format!("Clinic in {}", assignment.clinic_address_fragment),
            clinic_lookup_sql(assignment),
        ),
    ];

    let mut dumps = Vec::with_capacity(queries.len());
    for (title, sql) in queries {
        debug!(title = title.as_str(), "report query");
        dumps.push(TableDump::new(title, db.query(&sql)?));
    }
    Ok(dumps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem_db;
    use crate::queries::bootstrap::{run_bootstrap, BootstrapOptions};
    use crate::seed::MANAGER_ASSIGNMENT;
    use rstest::rstest;

    fn options(owner: &str) -> ReportOptions {
        ReportOptions {
            owner: OwnerName::parse(owner).unwrap(),
            assignment: MANAGER_ASSIGNMENT,
        }
    }

    #[rstest]
    #[case("Catherine Williams", "Catherine Williams' No. of Pets")]
    #[case("Milan Diaz", "Milan Diaz's No. of Pets")]
    #[case("Frank", "Frank's No. of Pets")]
    fn test_pet_count_heading(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(OwnerName::parse(name).unwrap().pet_count_heading(), expected);
    }

    #[test]
    fn test_parse_empty_owner() {
        assert!(OwnerName::parse("   ").is_err());
    }

    #[test]
    fn test_report_after_bootstrap() {
        let mut db = open_mem_db();
        run_bootstrap(&mut db, &BootstrapOptions::default()).unwrap();

        let dumps = run_report(&mut db, &options("Catherine Williams")).unwrap();
        assert_eq!(dumps.len(), 5);

        assert_eq!(dumps[0].headers, vec!["Catherine Williams' No. of Pets"]);
        assert_eq!(dumps[0].rows, vec![vec![Value::Integer(1)]]);

        let positions = dumps[1].column("positionName").unwrap();
        assert_eq!(positions.len(), 5);
        assert_eq!(positions[0], &Value::from("Receptionist"));

        let clinics: Vec<String> = dumps[2]
            .column("clinicNo")
            .unwrap()
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(clinics, vec!["C00001", "C00002", "C00003", "C00004", "C00005"]);
        let counters: Vec<i64> = dumps[2]
            .column("petCounter")
            .unwrap()
            .into_iter()
            .filter_map(Value::as_i64)
            .collect();
        // P00007 joins C00001
        assert_eq!(counters, vec![2, 2, 1, 1, 1]);

        assert_eq!(dumps[3].row_count(), 1);
        assert_eq!(dumps[4].column("manager").unwrap(), vec![&Value::from("S00003")]);
    }

    #[test]
    fn test_pet_count_sql_uses_resolved_owner() {
        let owner = OwnerName::parse("Catherine Williams").unwrap();
        assert_eq!(
            pet_count_sql(&owner, "O00002"),
            "SELECT COUNT(*) AS \"Catherine Williams' No. of Pets\" FROM Pet WHERE ownerNo = 'O00002'"
        );
    }

    #[rstest]
    #[case("a")]
    #[case("Nobody Here")]
    fn test_owner_must_match_exactly_once(#[case] name: &str) {
        let mut db = open_mem_db();
        run_bootstrap(&mut db, &BootstrapOptions::default()).unwrap();

        let err = run_report(&mut db, &options(name)).unwrap_err();
        assert!(matches!(err, DbError::QueryFailed { .. }));
        assert!(
            err.to_string()
                .contains(&format!("Expected exactly one owner matching '{}'", name)),
            "{err}"
        );
    }

    #[test]
    fn test_average_salary_values() {
        let mut db = open_mem_db();
        run_bootstrap(&mut db, &BootstrapOptions::default()).unwrap();

        let result = db.query(AVERAGE_SALARY_SQL).unwrap();
        let senior = result
            .rows
            .iter()
            .find(|row| row[0] == Value::from("Senior Veterinarian"))
            .unwrap();
        assert_eq!(senior[1], Value::Real(120000.0));
    }
}
