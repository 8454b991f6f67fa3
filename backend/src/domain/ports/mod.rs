//! Port traits implemented by outbound adapters.
//!
//! Handlers depend on these traits (held as `Arc<dyn …>`) rather than on
//! concrete adapters, keeping the HTTP layer testable without I/O. Each
//! port carries its own error enum so adapters stay decoupled from the
//! domain error envelope; inbound adapters perform the mapping.

mod appointment_repository;
mod mail_transport;
mod notification_outbox;
mod user_repository;
mod vaccination_repository;

pub use appointment_repository::{AppointmentPersistenceError, AppointmentRepository};
pub use mail_transport::{MailTransport, MailTransportError};
pub use notification_outbox::{NotificationOutbox, OutboxError};
pub use user_repository::{UserPersistenceError, UserRepository};
pub use vaccination_repository::{VaccinationPersistenceError, VaccinationRepository};
