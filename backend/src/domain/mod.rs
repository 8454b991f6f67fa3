//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed clinic entities used by the HTTP and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc. No framework or I/O types appear in this module tree.

pub mod appointment;
pub mod auth;
pub mod error;
pub mod notification;
pub mod ports;
pub mod user;
pub mod vaccination;

pub use self::appointment::{
    Appointment, AppointmentStatus, AppointmentValidationError, NewAppointment, PetName,
    StatusCounts,
};
pub use self::auth::{LoginCredentials, LoginValidationError, PasswordHash, PasswordHashError};
pub use self::error::{DomainError, ErrorCode};
pub use self::notification::{Notification, QueuedNotification};
pub use self::user::{NewUser, Role, User, Username, UserValidationError};
pub use self::vaccination::{NewVaccination, VaccinationRecord, VaccinationValidationError};

/// Convenient result alias for domain-facing operations.
pub type DomainResult<T> = Result<T, DomainError>;
