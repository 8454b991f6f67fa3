//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentRepository, NotificationOutbox, UserRepository, VaccinationRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub vaccinations: Arc<dyn VaccinationRepository>,
    pub outbox: Arc<dyn NotificationOutbox>,
}

impl HttpState {
    /// Bundle the port implementations used by the handlers.
    pub fn new(
        users: Arc<dyn UserRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        vaccinations: Arc<dyn VaccinationRepository>,
        outbox: Arc<dyn NotificationOutbox>,
    ) -> Self {
        Self {
            users,
            appointments,
            vaccinations,
            outbox,
        }
    }
}
