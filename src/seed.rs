//! Seed fixtures for the clinic database.
//!
//! Every row is a typed literal; `SeedRow::values` turns it into the
//! positional `Value`s the backend binds, in the column order of the owning
//! `SchemaTable`.
//!
//! ## Available Fixtures
//!
//! - [`POSITIONS`] - 5 job titles
//! - [`CLINICS`] - 5 Miami branches with their initial managers
//! - [`STAFF`] - 10 employees
//! - [`ANIMALS`] - 6 species/breed pairs
//! - [`OWNERS`] - 6 owners
//! - [`PETS`] - 6 pets
//! - [`EXAMINATIONS`] - 6 visits
//!
//! Applied after seeding: [`NEW_OWNER`] / [`NEW_PET`] and [`MANAGER_ASSIGNMENT`].

use crate::db::schema::{self, SchemaTable};
use crate::db::{like_contains, Value};

/// A fixture row destined for one table.
pub trait SeedRow {
    /// Table the row belongs to.
    fn table() -> &'static SchemaTable;

    /// Values in the table's column order.
    fn values(&self) -> Vec<Value>;
}

/// Convert a fixture slice to backend rows.
pub fn rows<T: SeedRow>(items: &[T]) -> Vec<Vec<Value>> {
    items.iter().map(SeedRow::values).collect()
}

/// Fixture rows for `table`, or nothing for an unknown table.
pub fn rows_for(table: &SchemaTable) -> Vec<Vec<Value>> {
    match table.name {
        "Position" => rows(POSITIONS),
        "Clinic" => rows(CLINICS),
        "Staff" => rows(STAFF),
        "Animal" => rows(ANIMALS),
        "Owner" => rows(OWNERS),
        "Pet" => rows(PETS),
        "Examination" => rows(EXAMINATIONS),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub position_no: &'static str,
    pub name: &'static str,
    pub salary: f64,
}

impl SeedRow for Position {
    fn table() -> &'static SchemaTable {
        &schema::POSITION
    }

    fn values(&self) -> Vec<Value> {
        vec![self.position_no.into(), self.name.into(), self.salary.into()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clinic {
    pub clinic_no: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub telephone: i64,
    pub manager: Option<&'static str>,
}

impl SeedRow for Clinic {
    fn table() -> &'static SchemaTable {
        &schema::CLINIC
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.clinic_no.into(),
            self.name.into(),
            self.address.into(),
            self.telephone.into(),
            self.manager.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    pub staff_no: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub address: Option<&'static str>,
    pub dob: Option<&'static str>,
    pub position_no: &'static str,
    pub clinic_no: &'static str,
}

impl SeedRow for Staff {
    fn table() -> &'static SchemaTable {
        &schema::STAFF
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.staff_no.into(),
            self.first_name.into(),
            self.last_name.into(),
            self.address.into(),
            self.dob.into(),
            self.position_no.into(),
            self.clinic_no.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub species: &'static str,
    pub breed: &'static str,
}

impl SeedRow for Animal {
    fn table() -> &'static SchemaTable {
        &schema::ANIMAL
    }

    fn values(&self) -> Vec<Value> {
        vec![self.species.into(), self.breed.into()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub owner_no: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub address: &'static str,
    pub telephone: i64,
}

impl SeedRow for Owner {
    fn table() -> &'static SchemaTable {
        &schema::OWNER
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.owner_no.into(),
            self.first_name.into(),
            self.last_name.into(),
            self.address.into(),
            self.telephone.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub pet_no: &'static str,
    pub dob: &'static str,
    pub species: &'static str,
    pub breed: &'static str,
    pub color: Option<&'static str>,
    pub clinic_no: &'static str,
    pub owner_no: &'static str,
}

impl SeedRow for Pet {
    fn table() -> &'static SchemaTable {
        &schema::PET
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.pet_no.into(),
            self.dob.into(),
            self.species.into(),
            self.breed.into(),
            self.color.into(),
            self.clinic_no.into(),
            self.owner_no.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Examination {
    pub exam_no: &'static str,
    pub complaint: &'static str,
    pub description: &'static str,
    pub date: &'static str,
    pub action: &'static str,
    pub pet_no: &'static str,
    pub staff_no: &'static str,
}

impl SeedRow for Examination {
    fn table() -> &'static SchemaTable {
        &schema::EXAMINATION
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.exam_no.into(),
            self.complaint.into(),
            self.description.into(),
            self.date.into(),
            self.action.into(),
            self.pet_no.into(),
            self.staff_no.into(),
        ]
    }
}

const fn position(position_no: &'static str, name: &'static str, salary: f64) -> Position {
    Position {
        position_no,
        name,
        salary,
    }
}

pub const POSITIONS: &[Position] = &[
    position("J00001", "Senior Veterinarian", 120000.0),
    position("J00002", "Veterinarian", 75000.0),
    position("J00003", "Veterinary Technician", 65000.0),
    position("J00004", "Veterinary Nurse", 55000.0),
    position("J00005", "Receptionist", 40000.0),
];

const fn clinic(
    clinic_no: &'static str,
    name: &'static str,
    address: &'static str,
    telephone: i64,
    manager: &'static str,
) -> Clinic {
    Clinic {
        clinic_no,
        name,
        address,
        telephone,
        manager: Some(manager),
    }
}

/// Initial managers; C00003 is reassigned by [`MANAGER_ASSIGNMENT`].
pub const CLINICS: &[Clinic] = &[
    clinic("C00001", "Downtown Pawsome Clinic", "123 Downtown St, Miami, FL", 3051234567, "S00001"),
    clinic("C00002", "South Beach Pawsome Clinic", "456 South Beach Ave, Miami, FL", 3052345678, "S00007"),
    clinic("C00003", "Little Havana Pawsome Clinic", "789 Little Havana Blvd, Miami, FL", 3053456789, "S00008"),
    clinic("C00004", "Coral Gables Pawsome Clinic", "321 Coral Gables Rd, Miami, FL", 3054567890, "S00009"),
    clinic("C00005", "Midtown Pawsome Clinic", "654 Midtown Dr, Miami, FL", 3055678901, "S00006"),
];

const fn staff(
    staff_no: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    address: &'static str,
    dob: &'static str,
    position_no: &'static str,
    clinic_no: &'static str,
) -> Staff {
    Staff {
        staff_no,
        first_name,
        last_name,
        address: Some(address),
        dob: Some(dob),
        position_no,
        clinic_no,
    }
}

pub const STAFF: &[Staff] = &[
    staff("S00001", "Jessie", "Smith", "123 Elm Street, Miami, FL", "1985-06-15", "J00001", "C00001"),
    staff("S00002", "Amy", "Johnson", "456 Oak Avenue, Miami, FL", "1990-03-22", "J00002", "C00002"),
    staff("S00003", "Elizabeth", "McDonald", "789 Pine Road, Miami, FL", "1988-11-01", "J00003", "C00003"),
    staff("S00004", "Carl", "Peterson", "321 Palm Blvd, Miami, FL", "1975-05-09", "J00004", "C00004"),
    staff("S00005", "Roger", "Martin", "654 Maple Lane, Miami, FL", "1995-07-18", "J00005", "C00005"),
    staff("S00006", "David", "Wilson", "101 Biscayne Blvd, Miami, FL", "1982-08-25", "J00001", "C00005"),
    staff("S00007", "Laura", "Martinez", "202 Brickell Ave, Miami, FL", "1992-12-05", "J00001", "C00002"),
    staff("S00008", "Mark", "Garcia", "303 Coconut Grove Rd, Miami, FL", "1986-04-14", "J00001", "C00003"),
    staff("S00009", "Sophia", "Taylor", "404 Wynwood Blvd, Miami, FL", "1990-10-23", "J00001", "C00004"),
    staff("S00010", "Daniel", "Anderson", "505 Design District St, Miami, FL", "1993-03-17", "J00005", "C00005"),
];

pub const ANIMALS: &[Animal] = &[
    Animal { species: "Dog", breed: "Schnauzer" },
    Animal { species: "Dog", breed: "Dobermann" },
    Animal { species: "Dog", breed: "Golden Retriever" },
    Animal { species: "Cat", breed: "Persian" },
    Animal { species: "Cat", breed: "Siamese" },
    Animal { species: "Dog", breed: "Labrador" },
];

const fn owner(
    owner_no: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    address: &'static str,
    telephone: i64,
) -> Owner {
    Owner {
        owner_no,
        first_name,
        last_name,
        address,
        telephone,
    }
}

pub const OWNERS: &[Owner] = &[
    owner("O00001", "Alice", "Smith", "123 Main St, Miami, FL", 3051234567),
    owner("O00002", "Bob", "Johnson", "456 Oak Ave, Miami, FL", 3052345678),
    owner("O00003", "Catherine", "Williams", "789 Pine Rd, Miami, FL", 3053456789),
    owner("O00004", "Daniel", "Brown", "321 Elm St, Miami, FL", 3054567890),
    owner("O00005", "Emily", "Davis", "654 Maple Lane, Miami, FL", 3055678901),
    owner("O00006", "Frank", "Wilson", "987 Palm Blvd, Miami, FL", 3056789012),
];

const fn pet(
    pet_no: &'static str,
    dob: &'static str,
    species: &'static str,
    breed: &'static str,
    color: &'static str,
    clinic_no: &'static str,
    owner_no: &'static str,
) -> Pet {
    Pet {
        pet_no,
        dob,
        species,
        breed,
        color: Some(color),
        clinic_no,
        owner_no,
    }
}

pub const PETS: &[Pet] = &[
    pet("P00001", "2015-01-09", "Dog", "Schnauzer", "Gray", "C00004", "O00006"),
    pet("P00002", "2019-07-14", "Dog", "Dobermann", "Brown", "C00003", "O00005"),
    pet("P00003", "2021-10-19", "Cat", "Siamese", "Beige", "C00001", "O00001"),
    pet("P00004", "2024-03-15", "Cat", "Persian", "White", "C00002", "O00002"),
    pet("P00005", "2018-12-23", "Dog", "Golden Retriever", "Yellow", "C00005", "O00004"),
    pet("P00006", "2018-11-04", "Cat", "Persian", "White", "C00002", "O00003"),
];

const fn exam(
    exam_no: &'static str,
    complaint: &'static str,
    description: &'static str,
    date: &'static str,
    action: &'static str,
    pet_no: &'static str,
    staff_no: &'static str,
) -> Examination {
    Examination {
        exam_no,
        complaint,
        description,
        date,
        action,
        pet_no,
        staff_no,
    }
}

pub const EXAMINATIONS: &[Examination] = &[
    exam("E00001", "Limping", "The pet is limping on its front right leg.", "2024-03-14", "Applied bandage and rest", "P00003", "S00001"),
    exam("E00002", "Vomiting", "The pet has been vomiting frequently.", "2024-06-15", "Administered anti-nausea medication", "P00004", "S00002"),
    exam("E00003", "Fever", "The pet has a high fever.", "2024-07-02", "Prescribed fever reducer", "P00001", "S00003"),
    exam("E00004", "Skin irritation", "The pet has itching and rash on the back.", "2024-09-08", "Applied topical cream", "P00002", "S00004"),
    exam("E00005", "Ear infection", "The pet is scratching its ears frequently.", "2024-10-15", "Prescribed ear drops", "P00005", "S00005"),
    exam("E00006", "Coughing", "The pet has been coughing for a few days.", "2024-10-20", "Prescribed cough syrup", "P00006", "S00006"),
];

/// Owner registered after the initial seed.
pub const NEW_OWNER: Owner = owner(
    "O00007",
    "Milan",
    "Diaz",
    "Coral Gables, Miami, FL",
    3056789012,
);

/// Pet registered together with [`NEW_OWNER`].
pub const NEW_PET: Pet = pet(
    "P00007",
    "2020-02-11",
    "Dog",
    "Golden Retriever",
    "Yellow",
    "C00001",
    "O00007",
);

/// Make the staff member matching a name the manager of the clinic whose
/// address contains a fragment. Both sides are resolved by sub-select.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerAssignment {
    pub staff_first_name: &'static str,
    pub staff_last_name: &'static str,
    pub clinic_address_fragment: &'static str,
}

impl ManagerAssignment {
    pub fn staff_lookup_sql(&self) -> String {
        format!(
            "SELECT staffNo FROM Staff WHERE staffFName LIKE {} AND staffLName LIKE {}",
            like_contains(self.staff_first_name),
            like_contains(self.staff_last_name)
        )
    }

    pub fn clinic_lookup_sql(&self) -> String {
        format!(
            "SELECT clinicNo FROM Clinic WHERE clinicAddress LIKE {}",
            like_contains(self.clinic_address_fragment)
        )
    }

    pub fn update_sql(&self) -> String {
        format!(
            "UPDATE Clinic SET manager = ({}) WHERE clinicNo = ({})",
            self.staff_lookup_sql(),
            self.clinic_lookup_sql()
        )
    }
}

pub const MANAGER_ASSIGNMENT: ManagerAssignment = ManagerAssignment {
    staff_first_name: "Elizabeth",
    staff_last_name: "McDonald",
    clinic_address_fragment: "Little Havana",
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&schema::POSITION, 5)]
    #[case(&schema::CLINIC, 5)]
    #[case(&schema::STAFF, 10)]
    #[case(&schema::ANIMAL, 6)]
    #[case(&schema::OWNER, 6)]
    #[case(&schema::PET, 6)]
    #[case(&schema::EXAMINATION, 6)]
    fn test_fixture_sizes(#[case] table: &SchemaTable, #[case] expected: usize) {
        assert_eq!(rows_for(table).len(), expected);
    }

    #[test]
    fn test_rows_match_column_count() {
        for table in schema::ALL_TABLES {
            for row in rows_for(table) {
                assert_eq!(row.len(), table.columns.len(), "{}", table.name);
            }
        }
    }

    #[test]
    fn test_salaries_positive() {
        assert!(POSITIONS.iter().all(|p| p.salary > 0.0));
    }

    #[test]
    fn test_initial_managers_distinct_and_known() {
        let managers: Vec<_> = CLINICS.iter().filter_map(|c| c.manager).collect();
        let mut deduped = managers.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(managers.len(), deduped.len());
        assert!(managers.iter().all(|m| STAFF.iter().any(|s| s.staff_no == *m)));
    }

    #[test]
    fn test_pets_reference_known_animals() {
        for pet in PETS.iter().chain(std::iter::once(&NEW_PET)) {
            assert!(
                ANIMALS
                    .iter()
                    .any(|a| a.species == pet.species && a.breed == pet.breed),
                "{}",
                pet.pet_no
            );
        }
    }

    #[test]
    fn test_new_pet_belongs_to_new_owner() {
        assert_eq!(NEW_PET.owner_no, NEW_OWNER.owner_no);
        assert!(OWNERS.iter().all(|o| o.owner_no != NEW_OWNER.owner_no));
        assert!(PETS.iter().all(|p| p.pet_no != NEW_PET.pet_no));
    }

    #[test]
    fn test_manager_update_sql() {
        assert_eq!(
            MANAGER_ASSIGNMENT.update_sql(),
            "UPDATE Clinic SET manager = (SELECT staffNo FROM Staff WHERE staffFName LIKE '%Elizabeth%' \
             AND staffLName LIKE '%McDonald%') WHERE clinicNo = (SELECT clinicNo FROM Clinic \
             WHERE clinicAddress LIKE '%Little Havana%')"
        );
    }

    #[test]
    fn test_clinic_values_order() {
        assert_eq!(
            CLINICS[0].values(),
            vec![
                Value::from("C00001"),
                Value::from("Downtown Pawsome Clinic"),
                Value::from("123 Downtown St, Miami, FL"),
                Value::Integer(3051234567),
                Value::from("S00001"),
            ]
        );
        assert_eq!(<Clinic as SeedRow>::table().name, "Clinic");
    }
}
