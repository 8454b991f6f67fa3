//! SQLite persistence adapters using the Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by SQLite via Diesel with an r2d2 connection pool.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed
//!   to the domain layer.
//! - **Blocking off the runtime**: every Diesel call runs inside
//!   `spawn_blocking`; handlers only ever await.
//! - **Strongly typed errors**: database errors are mapped to the port
//!   error types, including the unique-constraint mapping for duplicate
//!   usernames.

mod diesel_appointment_repository;
mod diesel_outbox;
mod diesel_user_repository;
mod diesel_vaccination_repository;
mod migrations;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_outbox::DieselNotificationOutbox;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vaccination_repository::DieselVaccinationRepository;
pub use migrations::{run_pending_migrations, MigrationError, MIGRATIONS};
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};

/// Run a blocking persistence job on the blocking thread pool.
///
/// `join_error` converts an executor failure (cancelled or panicked task)
/// into the caller's port error type.
pub(crate) async fn run_blocking<T, E>(
    job: impl FnOnce() -> Result<T, E> + Send + 'static,
    join_error: impl FnOnce(String) -> E,
) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(result) => result,
        Err(err) => Err(join_error(err.to_string())),
    }
}
