//! Port abstraction for appointment persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Appointment, AppointmentStatus, NewAppointment, StatusCounts, Username};

/// Persistence errors raised by appointment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentPersistenceError {
    /// Repository connection could not be established.
    #[error("appointment repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("appointment repository query failed: {message}")]
    Query { message: String },
}

impl AppointmentPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Access to stored appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a new request with status Pending, returning the stored row.
    async fn insert(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentPersistenceError>;

    /// Fetch an appointment by identifier.
    async fn find_by_id(&self, id: i32)
        -> Result<Option<Appointment>, AppointmentPersistenceError>;

    /// Overwrite the status of an appointment unconditionally.
    ///
    /// Returns `Ok(None)` when no row matches `id`; a missing appointment
    /// is never a silent no-op.
    async fn update_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppointmentPersistenceError>;

    /// All appointments requested by `owner`, in creation order.
    async fn list_for_owner(
        &self,
        owner: &Username,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError>;

    /// Every appointment regardless of owner, in creation order.
    async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentPersistenceError>;

    /// Per-status totals for the analytics view.
    async fn status_counts(&self) -> Result<StatusCounts, AppointmentPersistenceError>;
}
