//! Vaccination ledger entries.
//!
//! The ledger is append-only and deliberately unrelated to appointments or
//! owners: entries carry only the pet's name and the vaccine dates. No
//! ordering constraint between `given_date` and `next_due` is enforced.

use std::fmt;

use chrono::NaiveDate;

use super::appointment::PetName;

/// Validation errors returned by the vaccination constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaccinationValidationError {
    EmptyVaccine,
}

impl fmt::Display for VaccinationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVaccine => write!(f, "vaccine name must not be empty"),
        }
    }
}

impl std::error::Error for VaccinationValidationError {}

/// Stored vaccination ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccinationRecord {
    id: i32,
    pet_name: PetName,
    vaccine: String,
    given_date: NaiveDate,
    next_due: NaiveDate,
}

impl VaccinationRecord {
    /// Build a stored record from validated components.
    pub fn new(
        id: i32,
        pet_name: PetName,
        vaccine: String,
        given_date: NaiveDate,
        next_due: NaiveDate,
    ) -> Self {
        Self {
            id,
            pet_name,
            vaccine,
            given_date,
            next_due,
        }
    }

    /// Stable ledger identifier; insertion order follows this.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Pet the vaccine was administered to.
    pub fn pet_name(&self) -> &PetName {
        &self.pet_name
    }

    /// Vaccine name as entered by the vet.
    pub fn vaccine(&self) -> &str {
        self.vaccine.as_str()
    }

    /// Date the vaccine was administered.
    pub fn given_date(&self) -> NaiveDate {
        self.given_date
    }

    /// Date the next dose is due.
    pub fn next_due(&self) -> NaiveDate {
        self.next_due
    }
}

/// A ledger entry awaiting insertion; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewVaccination {
    pub pet_name: PetName,
    pub vaccine: String,
    pub given_date: NaiveDate,
    pub next_due: NaiveDate,
}

impl NewVaccination {
    /// Validate raw vaccine text alongside an already-validated pet name.
    pub fn try_new(
        pet_name: PetName,
        vaccine: &str,
        given_date: NaiveDate,
        next_due: NaiveDate,
    ) -> Result<Self, VaccinationValidationError> {
        let vaccine = vaccine.trim();
        if vaccine.is_empty() {
            return Err(VaccinationValidationError::EmptyVaccine);
        }
        Ok(Self {
            pet_name,
            vaccine: vaccine.to_owned(),
            given_date,
            next_due,
        })
    }
}
