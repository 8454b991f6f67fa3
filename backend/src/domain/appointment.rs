//! Appointments and their lifecycle status.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::Username;

/// Validation errors returned by the appointment constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    EmptyPetName,
    PetNameTooLong { max: usize },
    EmptyReason,
    UnknownStatus { value: String },
}

impl fmt::Display for AppointmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPetName => write!(f, "pet name must not be empty"),
            Self::PetNameTooLong { max } => {
                write!(f, "pet name must be at most {max} characters")
            }
            Self::EmptyReason => write!(f, "reason must not be empty"),
            Self::UnknownStatus { value } => write!(
                f,
                "status must be 'Pending', 'Approved', or 'Rejected', got '{value}'",
            ),
        }
    }
}

impl std::error::Error for AppointmentValidationError {}

/// Lifecycle status of an appointment.
///
/// The set is closed; transitions between any two members are allowed so a
/// vet can revise a mistaken decision. Unrecognised strings are rejected at
/// the boundary instead of being stored verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    /// Awaiting a vet's decision. Initial state for every appointment.
    #[default]
    Pending,
    /// Accepted by a vet.
    Approved,
    /// Declined by a vet.
    Rejected,
}

impl AppointmentStatus {
    /// Canonical capitalised token stored in the database and shown in
    /// notifications.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(AppointmentValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Maximum allowed length for a pet name.
pub const PET_NAME_MAX: usize = 100;

/// Validated pet name, shared by appointments and the vaccination ledger.
///
/// Pets have no identity beyond this name; records match by exact string
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PetName(String);

impl PetName {
    /// Validate and construct a [`PetName`], trimming surrounding
    /// whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, AppointmentValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppointmentValidationError::EmptyPetName);
        }
        if trimmed.chars().count() > PET_NAME_MAX {
            return Err(AppointmentValidationError::PetNameTooLong { max: PET_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PetName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PetName> for String {
    fn from(value: PetName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PetName {
    type Error = AppointmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored appointment.
///
/// ## Invariants
/// - `owner` is the username of the requesting owner, denormalised by
///   value; no referential integrity links it to the users table.
/// - `status` starts as [`AppointmentStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    id: i32,
    pet_name: PetName,
    owner: Username,
    date: NaiveDate,
    reason: String,
    status: AppointmentStatus,
}

impl Appointment {
    /// Build a stored appointment from validated components.
    pub fn new(
        id: i32,
        pet_name: PetName,
        owner: Username,
        date: NaiveDate,
        reason: String,
        status: AppointmentStatus,
    ) -> Self {
        Self {
            id,
            pet_name,
            owner,
            date,
            reason,
            status,
        }
    }

    /// Stable appointment identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Pet the visit is for.
    pub fn pet_name(&self) -> &PetName {
        &self.pet_name
    }

    /// Username of the requesting owner.
    pub fn owner(&self) -> &Username {
        &self.owner
    }

    /// Requested visit date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Owner-supplied reason for the visit.
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> AppointmentStatus {
        self.status
    }
}

/// An appointment request awaiting insertion; the store assigns the
/// identifier and the status defaults to Pending.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub pet_name: PetName,
    pub owner: Username,
    pub date: NaiveDate,
    pub reason: String,
}

/// Per-status appointment totals for the analytics view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pending", AppointmentStatus::Pending)]
    #[case("Approved", AppointmentStatus::Approved)]
    #[case("Rejected", AppointmentStatus::Rejected)]
    fn status_parses_canonical_tokens(#[case] input: &str, #[case] expected: AppointmentStatus) {
        assert_eq!(
            input.parse::<AppointmentStatus>().expect("valid status"),
            expected
        );
        assert_eq!(expected.as_str(), input);
    }

    #[rstest]
    #[case("approved")]
    #[case("Cancelled")]
    #[case("")]
    fn status_rejects_unrecognised_strings(#[case] input: &str) {
        let err = input
            .parse::<AppointmentStatus>()
            .expect_err("must reject unknown status");
        assert!(matches!(
            err,
            AppointmentValidationError::UnknownStatus { .. }
        ));
    }

    #[rstest]
    fn status_defaults_to_pending() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Pending);
    }

    #[rstest]
    #[case("Rex")]
    #[case("  Mr Whiskers  ")]
    fn pet_name_accepts_and_trims(#[case] input: &str) {
        let name = PetName::new(input).expect("valid pet name");
        assert_eq!(name.as_ref(), input.trim());
    }

    #[rstest]
    fn pet_name_rejects_blank_input() {
        assert_eq!(
            PetName::new("   ").expect_err("must reject"),
            AppointmentValidationError::EmptyPetName
        );
    }
}
