//! Schema bootstrap: reset, create, seed and close the Clinic/Staff cycle.
//!
//! The run is planned first as a list of [`Step`]s, then executed inside one
//! transaction. Planning never touches the database, so the same plan backs
//! `setup --dry-run`.
//!
//! Clinic and Staff reference each other. Both are created without their
//! cross references, seeded, and then finished with [`finish_statements`]:
//! a backup-swap on SQLite, `ALTER TABLE ... ADD CONSTRAINT` on PostgreSQL.
//! Foreign-key checks stay suspended from the reset until both tables carry
//! their final constraints, then an integrity gate runs before anything
//! depending on them is created.

use serde::Serialize;
use tracing::{info, warn};

use crate::db::schema::{
    finish_statements, DdlCompiler, Phase, SchemaTable, ALL_TABLES, RESET_ORDER,
};
use crate::db::{values_tuple, DatabaseBackend, DbError, Dialect, Value};
use crate::queries::dump::select_all_sql;
use crate::queries::integrity;
use crate::queries::report::{clinic_lookup_sql, staff_lookup_sql};
use crate::seed::{self, ManagerAssignment, SeedRow, MANAGER_ASSIGNMENT, NEW_OWNER, NEW_PET};
use crate::types::TableDump;

/// Options for a bootstrap run.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Stop after seeding; skip the owner registration and manager update.
    pub skip_demo: bool,
}

/// One unit of the bootstrap plan.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    SuspendForeignKeys,
    Reset,
    Create(&'static SchemaTable),
    Seed(&'static SchemaTable),
    Finish(&'static SchemaTable),
    ResumeForeignKeys,
    CheckIntegrity,
    RegisterOwnerAndPet,
    AssignManager,
}

impl Step {
    pub fn describe(&self, dialect: Dialect) -> String {
        match self {
            Step::SuspendForeignKeys => "Suspend foreign-key checks".to_string(),
            Step::Reset => format!("Drop existing tables ({})", table_list(RESET_ORDER)),
            Step::Create(table) if table.has_deferred_constraints() => {
                format!("Create {} without its cross references", table.name)
            }
            Step::Create(table) => format!("Create {}", table.name),
            Step::Seed(table) => format!("Seed {}", table.name),
            Step::Finish(table) if dialect.supports_add_constraint() => {
                format!("Add deferred constraints to {}", table.name)
            }
            Step::Finish(table) => format!("Rebuild {} with final constraints (backup-swap)", table.name),
            Step::ResumeForeignKeys => "Resume foreign-key checks".to_string(),
            Step::CheckIntegrity => "Check referential integrity".to_string(),
            Step::RegisterOwnerAndPet => format!(
                "Register owner {} {} ({}) with pet {}",
                NEW_OWNER.first_name, NEW_OWNER.last_name, NEW_OWNER.owner_no, NEW_PET.pet_no
            ),
            Step::AssignManager => format!(
                "Assign {} {} as manager of the {} clinic",
                MANAGER_ASSIGNMENT.staff_first_name,
                MANAGER_ASSIGNMENT.staff_last_name,
                MANAGER_ASSIGNMENT.clinic_address_fragment
            ),
        }
    }

    /// SQL the step runs on `dialect`. Seeds are rendered as literal inserts.
    pub fn statements(&self, dialect: Dialect) -> Vec<String> {
        match self {
            Step::SuspendForeignKeys => dialect
                .defer_foreign_keys_sql(true)
                .map(str::to_string)
                .into_iter()
                .collect(),
            Step::ResumeForeignKeys => dialect
                .defer_foreign_keys_sql(false)
                .map(str::to_string)
                .into_iter()
                .collect(),
            Step::Reset => RESET_ORDER
                .iter()
                .map(|table| DdlCompiler::compile_drop_table(table.name, dialect))
                .collect(),
            Step::Create(table) => vec![DdlCompiler::compile_create_table(table, Phase::Initial, dialect)],
            Step::Seed(table) => vec![literal_insert(table, &seed::rows_for(table))],
            Step::Finish(table) => finish_statements(table, dialect),
            Step::CheckIntegrity => Vec::new(),
            Step::RegisterOwnerAndPet => vec![
                literal_insert(<seed::Owner as SeedRow>::table(), &[NEW_OWNER.values()]),
                literal_insert(<seed::Pet as SeedRow>::table(), &[NEW_PET.values()]),
            ],
            Step::AssignManager => vec![MANAGER_ASSIGNMENT.update_sql()],
        }
    }
}

/// Build the ordered plan.
///
/// Tables are created in `ALL_TABLES` order. Right after the last table of
/// the reference cycle is seeded, every cyclic table is finished, checks are
/// resumed and integrity is verified.
pub fn plan(options: &BootstrapOptions) -> Vec<Step> {
    let cyclic: Vec<&'static SchemaTable> = ALL_TABLES
        .iter()
        .copied()
        .filter(|t| t.has_deferred_constraints())
        .collect();
    let last_cyclic = ALL_TABLES.iter().rposition(|t| t.has_deferred_constraints());

    let mut steps = vec![Step::SuspendForeignKeys, Step::Reset];
    if last_cyclic.is_none() {
        steps.push(Step::ResumeForeignKeys);
    }

    for (idx, table) in ALL_TABLES.iter().copied().enumerate() {
        steps.push(Step::Create(table));
        steps.push(Step::Seed(table));
        if Some(idx) == last_cyclic {
            steps.extend(cyclic.iter().copied().map(Step::Finish));
            steps.push(Step::ResumeForeignKeys);
            steps.push(Step::CheckIntegrity);
        }
    }

    if !options.skip_demo {
        steps.push(Step::RegisterOwnerAndPet);
        steps.push(Step::AssignManager);
    }
    steps.push(Step::CheckIntegrity);
    steps
}

/// A planned step as shown by a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub step: usize,
    pub description: String,
    pub statements: Vec<String>,
}

/// Render the plan for `dialect` without executing it.
pub fn preview(options: &BootstrapOptions, dialect: Dialect) -> Vec<PlannedStep> {
    plan(options)
        .iter()
        .enumerate()
        .map(|(idx, step)| PlannedStep {
            step: idx + 1,
            description: step.describe(dialect),
            statements: step.statements(dialect),
        })
        .collect()
}

/// What an executed step did.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub description: String,
    pub rows: usize,
}

/// Snapshots taken around a demonstration mutation.
#[derive(Debug, Clone, Serialize)]
pub struct MutationReport {
    pub description: String,
    pub before: Vec<TableDump>,
    pub after: Vec<TableDump>,
}

/// Row count of a table after the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

/// Result of a committed bootstrap.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub backend: String,
    pub steps: Vec<StepOutcome>,
    pub mutations: Vec<MutationReport>,
    pub table_counts: Vec<TableCount>,
}

/// Run the whole bootstrap inside one transaction.
///
/// Commits on success. On any error the transaction is rolled back and the
/// original error returned.
pub fn run_bootstrap(
    db: &mut dyn DatabaseBackend,
    options: &BootstrapOptions,
) -> Result<BootstrapReport, DbError> {
    let steps = plan(options);
    info!(backend = db.backend_name(), steps = steps.len(), "starting bootstrap");

    db.begin()?;
    let result = execute_plan(db, &steps).and_then(|report| {
        db.commit()?;
        Ok(report)
    });
    match result {
        Ok(report) => {
            info!("bootstrap committed");
            Ok(report)
        }
        Err(e) => {
            warn!(error = %e, "bootstrap failed, rolling back");
            if let Err(rollback_err) = db.rollback() {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(e)
        }
    }
}

fn execute_plan(db: &mut dyn DatabaseBackend, steps: &[Step]) -> Result<BootstrapReport, DbError> {
    let dialect = db.dialect();
    let mut report = BootstrapReport {
        backend: db.backend_name().to_string(),
        steps: Vec::with_capacity(steps.len()),
        mutations: Vec::new(),
        table_counts: Vec::new(),
    };

    for (idx, step) in steps.iter().enumerate() {
        let description = step.describe(dialect);
        info!(step = idx + 1, "{}", description);

        let rows = match step {
            Step::SuspendForeignKeys => {
                db.suspend_foreign_keys()?;
                0
            }
            Step::ResumeForeignKeys => {
                db.resume_foreign_keys()?;
                0
            }
            Step::Reset | Step::Create(_) => {
                for sql in step.statements(dialect) {
                    db.execute(&sql)?;
                }
                0
            }
            Step::Seed(table) => seed_table(db, table)?,
            Step::Finish(table) => finish_table(db, table, dialect)?,
            Step::CheckIntegrity => {
                integrity::enforce(db)?;
                0
            }
            Step::RegisterOwnerAndPet => {
                let (rows, mutation) = register_owner_and_pet(db, description.clone())?;
                report.mutations.push(mutation);
                rows
            }
            Step::AssignManager => {
                let (rows, mutation) = assign_manager(db, description.clone())?;
                report.mutations.push(mutation);
                rows
            }
        };

        report.steps.push(StepOutcome {
            step: idx + 1,
            description,
            rows,
        });
    }

    for table in ALL_TABLES {
        report.table_counts.push(TableCount {
            table: table.name.to_string(),
            rows: db.row_count(table.name)?,
        });
    }

    Ok(report)
}

fn seed_table(db: &mut dyn DatabaseBackend, table: &SchemaTable) -> Result<usize, DbError> {
    let rows = seed::rows_for(table);
    db.insert_rows(table.name, &table.column_names(), &rows)
}

/// Finish a cyclic table and verify no row was lost on the way.
fn finish_table(
    db: &mut dyn DatabaseBackend,
    table: &SchemaTable,
    dialect: Dialect,
) -> Result<usize, DbError> {
    let expected = db.row_count(table.name)?;
    for sql in finish_statements(table, dialect) {
        db.execute(&sql)?;
    }
    let found = db.row_count(table.name)?;
    if found != expected {
        return Err(DbError::RowsLost {
            table: table.name.to_string(),
            step: "constraint finishing".to_string(),
            expected,
            found,
        });
    }
    Ok(found)
}

fn register_owner_and_pet(
    db: &mut dyn DatabaseBackend,
    description: String,
) -> Result<(usize, MutationReport), DbError> {
    let owner_table = <seed::Owner as SeedRow>::table();
    let pet_table = <seed::Pet as SeedRow>::table();

    let before = snapshot_tables(db, &[owner_table, pet_table])?;
    let mut rows = db.insert_rows(owner_table.name, &owner_table.column_names(), &[NEW_OWNER.values()])?;
    rows += db.insert_rows(pet_table.name, &pet_table.column_names(), &[NEW_PET.values()])?;
    let after = snapshot_tables(db, &[owner_table, pet_table])?;

    Ok((rows, MutationReport { description, before, after }))
}

fn assign_manager(
    db: &mut dyn DatabaseBackend,
    description: String,
) -> Result<(usize, MutationReport), DbError> {
    let assignment = &MANAGER_ASSIGNMENT;
    let staff = db.query(&staff_lookup_sql(assignment))?;
    if staff.rows.len() != 1 {
        return Err(DbError::QueryFailed {
            message: format!(
                "Expected exactly one staff member named {} {}, found {}",
                assignment.staff_first_name,
                assignment.staff_last_name,
                staff.rows.len()
            ),
        });
    }

    let before = manager_snapshot(db, assignment)?;
    let rows = db.execute(&assignment.update_sql())?;
    if rows != 1 {
        return Err(DbError::QueryFailed {
            message: format!(
                "Expected to update one clinic matching '{}', updated {}",
                assignment.clinic_address_fragment, rows
            ),
        });
    }
    let after = manager_snapshot(db, assignment)?;

    Ok((rows, MutationReport { description, before, after }))
}

fn manager_snapshot(
    db: &mut dyn DatabaseBackend,
    assignment: &ManagerAssignment,
) -> Result<Vec<TableDump>, DbError> {
    Ok(vec![
        TableDump::new("Staff", db.query(&staff_lookup_sql(assignment))?),
        TableDump::new("Clinic", db.query(&clinic_lookup_sql(assignment))?),
    ])
}

fn snapshot_tables(
    db: &mut dyn DatabaseBackend,
    tables: &[&SchemaTable],
) -> Result<Vec<TableDump>, DbError> {
    let mut dumps = Vec::with_capacity(tables.len());
    for table in tables {
        dumps.push(TableDump::new(table.name, db.query(&select_all_sql(table))?));
    }
    Ok(dumps)
}

fn literal_insert(table: &SchemaTable, rows: &[Vec<Value>]) -> String {
    let tuples: Vec<String> = rows.iter().map(|row| values_tuple(row)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        table.name,
        table.column_names().join(", "),
        tuples.join(", ")
    )
}

fn table_list(tables: &[&SchemaTable]) -> String {
    tables.iter().map(|t| t.name).collect::<Vec<_>>().join(", ")
}
