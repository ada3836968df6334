//! All clinic table definitions.
//!
//! This module defines the 7 tables that form the complete database schema.
//! Clinic and Staff reference each other; their cross references are declared
//! as deferred constraints (see `SchemaTable`).

use super::definition::{
    DataType, OnDelete, SchemaCheck, SchemaColumn, SchemaForeignKey, SchemaTable, SchemaUnique,
};

const fn column(name: &'static str, data_type: DataType) -> SchemaColumn {
    SchemaColumn {
        name,
        data_type,
        nullable: false,
        default: None,
    }
}

const fn nullable(name: &'static str, data_type: DataType) -> SchemaColumn {
    SchemaColumn {
        name,
        data_type,
        nullable: true,
        default: None,
    }
}

/// Position table: job titles and salaries
///
/// Key: positionNo
/// Check: salary > 0
pub const POSITION: SchemaTable = SchemaTable {
    name: "Position",
    columns: &[
        column("positionNo", DataType::Code),
        column("positionName", DataType::Name),
        column("salary", DataType::Decimal),
    ],
    primary_key: &["positionNo"],
    uniques: &[],
    checks: &[SchemaCheck {
        name: "check_positive_salary",
        expression: "salary > 0",
    }],
    foreign_keys: &[],
    deferred_uniques: &[],
    deferred_foreign_keys: &[],
};

/// Clinic table: branches, each optionally run by one staff member
///
/// Key: clinicNo
/// Deferred: UNIQUE(manager), manager -> Staff
pub const CLINIC: SchemaTable = SchemaTable {
    name: "Clinic",
    columns: &[
        column("clinicNo", DataType::Code),
        column("clinicName", DataType::Name),
        column("clinicAddress", DataType::Address),
        column("clinicTelephone", DataType::Phone),
        nullable("manager", DataType::Code),
    ],
    primary_key: &["clinicNo"],
    uniques: &[],
    checks: &[],
    foreign_keys: &[],
    deferred_uniques: &[SchemaUnique {
        name: "uq_clinic_manager",
        columns: &["manager"],
    }],
    deferred_foreign_keys: &[SchemaForeignKey {
        name: "fk_clinic_manager",
        columns: &["manager"],
        ref_table: "Staff",
        ref_columns: &["staffNo"],
        on_delete: OnDelete::NoAction,
    }],
};

/// Staff table: employees, each holding one position at one clinic
///
/// Key: staffNo
/// References: positionNo -> Position
/// Deferred: clinicNo -> Clinic
pub const STAFF: SchemaTable = SchemaTable {
    name: "Staff",
    columns: &[
        column("staffNo", DataType::Code),
        column("staffFName", DataType::Name),
        column("staffLName", DataType::Name),
        nullable("staffAddress", DataType::Address),
        nullable("staffDOB", DataType::Date),
        column("positionNo", DataType::Code),
        column("clinicNo", DataType::Code),
    ],
    primary_key: &["staffNo"],
    uniques: &[],
    checks: &[],
    foreign_keys: &[SchemaForeignKey {
        name: "fk_staff_position",
        columns: &["positionNo"],
        ref_table: "Position",
        ref_columns: &["positionNo"],
        on_delete: OnDelete::NoAction,
    }],
    deferred_uniques: &[],
    deferred_foreign_keys: &[SchemaForeignKey {
        name: "fk_staff_clinic",
        columns: &["clinicNo"],
        ref_table: "Clinic",
        ref_columns: &["clinicNo"],
        on_delete: OnDelete::NoAction,
    }],
};

/// Animal table: species/breed taxonomy
///
/// Key: (species, breed)
pub const ANIMAL: SchemaTable = SchemaTable {
    name: "Animal",
    columns: &[column("species", DataType::Name), column("breed", DataType::Name)],
    primary_key: &["species", "breed"],
    uniques: &[],
    checks: &[],
    foreign_keys: &[],
    deferred_uniques: &[],
    deferred_foreign_keys: &[],
};

/// Owner table: pet owners
///
/// Key: ownerNo
pub const OWNER: SchemaTable = SchemaTable {
    name: "Owner",
    columns: &[
        column("ownerNo", DataType::Code),
        column("ownerFName", DataType::Name),
        column("ownerLName", DataType::Name),
        column("ownerAddress", DataType::Address),
        column("ownerTelephone", DataType::Phone),
    ],
    primary_key: &["ownerNo"],
    uniques: &[],
    checks: &[],
    foreign_keys: &[],
    deferred_uniques: &[],
    deferred_foreign_keys: &[],
};

/// Pet table: registered animals
///
/// Key: petNo
/// References: ownerNo -> Owner (cascade), clinicNo -> Clinic,
/// (species, breed) -> Animal
pub const PET: SchemaTable = SchemaTable {
    name: "Pet",
    columns: &[
        column("petNo", DataType::Code),
        column("petDOB", DataType::Date),
        column("species", DataType::Name),
        column("breed", DataType::Name),
        nullable("color", DataType::Name),
        column("clinicNo", DataType::Code),
        column("ownerNo", DataType::Code),
    ],
    primary_key: &["petNo"],
    uniques: &[],
    checks: &[],
    foreign_keys: &[
        SchemaForeignKey {
            name: "fk_pet_owner",
            columns: &["ownerNo"],
            ref_table: "Owner",
            ref_columns: &["ownerNo"],
            on_delete: OnDelete::Cascade,
        },
        SchemaForeignKey {
            name: "fk_pet_clinic",
            columns: &["clinicNo"],
            ref_table: "Clinic",
            ref_columns: &["clinicNo"],
            on_delete: OnDelete::NoAction,
        },
        SchemaForeignKey {
            name: "fk_pet_animal",
            columns: &["species", "breed"],
            ref_table: "Animal",
            ref_columns: &["species", "breed"],
            on_delete: OnDelete::NoAction,
        },
    ],
    deferred_uniques: &[],
    deferred_foreign_keys: &[],
};

/// Examination table: visits
///
/// Key: examNo
/// References: petNo -> Pet (cascade), staffNo -> Staff (default `S00000`)
pub const EXAMINATION: SchemaTable = SchemaTable {
    name: "Examination",
    columns: &[
        column("examNo", DataType::Code),
        column("complaint", DataType::Address),
        column("description", DataType::Address),
        column("examDate", DataType::Date),
        column("examAction", DataType::Address),
        column("petNo", DataType::Code),
        SchemaColumn {
            name: "staffNo",
            data_type: DataType::Code,
            nullable: false,
            default: Some("'S00000'"),
        },
    ],
    primary_key: &["examNo"],
    uniques: &[],
    checks: &[],
    foreign_keys: &[
        SchemaForeignKey {
            name: "fk_exam_pet",
            columns: &["petNo"],
            ref_table: "Pet",
            ref_columns: &["petNo"],
            on_delete: OnDelete::Cascade,
        },
        SchemaForeignKey {
            name: "fk_exam_staff",
            columns: &["staffNo"],
            ref_table: "Staff",
            ref_columns: &["staffNo"],
            on_delete: OnDelete::NoAction,
        },
    ],
    deferred_uniques: &[],
    deferred_foreign_keys: &[],
};

/// All tables in creation order: independent tables, the circular pair, then
/// dependents.
pub const ALL_TABLES: &[&SchemaTable] = &[
    &POSITION,
    &ANIMAL,
    &OWNER,
    &CLINIC,
    &STAFF,
    &PET,
    &EXAMINATION,
];

/// Drop order for a reset: leaf tables before the tables they reference.
pub const RESET_ORDER: &[&SchemaTable] = &[
    &EXAMINATION,
    &PET,
    &OWNER,
    &ANIMAL,
    &STAFF,
    &CLINIC,
    &POSITION,
];

/// Get list of all table names in creation order
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}

/// Find a table definition by name (case-insensitive)
pub fn table_by_name(name: &str) -> Option<&'static SchemaTable> {
    ALL_TABLES
        .iter()
        .copied()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}
