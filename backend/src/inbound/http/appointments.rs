//! Appointment request and decision handlers.
//!
//! ```text
//! POST /request              — owner files an appointment request
//! GET  /update/{id}/{status} — vet overwrites the lifecycle status
//! ```
//!
//! Both write paths enqueue a notification in the outbox; delivery happens
//! in the mailer worker, so a broken relay can never abort a committed
//! state change. Enqueue failures are logged and do not fail the request.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    Appointment, AppointmentStatus, DomainError, NewAppointment, Notification, PetName, Role,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_field_error, parse_date};
use crate::inbound::http::ApiResult;

/// Request payload for filing an appointment.
#[derive(Debug, Deserialize)]
pub struct AppointmentRequest {
    pub pet_name: String,
    pub date: String,
    pub reason: String,
}

/// Appointment as returned by every read and write endpoint.
#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub id: i32,
    pub pet_name: String,
    pub owner: String,
    pub date: String,
    pub reason: String,
    pub status: AppointmentStatus,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(value: &Appointment) -> Self {
        Self {
            id: value.id(),
            pet_name: value.pet_name().to_string(),
            owner: value.owner().to_string(),
            date: value.date().to_string(),
            reason: value.reason().to_owned(),
            status: value.status(),
        }
    }
}

async fn enqueue_or_log(state: &HttpState, notification: Notification) {
    if let Err(error) = state.outbox.enqueue(notification).await {
        // The state change is already committed; losing the notification
        // must not fail the request.
        warn!(%error, "failed to enqueue notification");
    }
}

/// File a new appointment request; status starts as Pending.
#[post("/request")]
pub async fn request_appointment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AppointmentRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_role(Role::Owner)?;

    let pet_name =
        PetName::new(&payload.pet_name).map_err(|error| invalid_field_error("pet_name", error))?;
    let date = parse_date("date", &payload.date)?;
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(invalid_field_error("reason", "must not be empty").into());
    }

    let appointment = state
        .appointments
        .insert(NewAppointment {
            pet_name,
            owner: owner.username,
            date,
            reason: reason.to_owned(),
        })
        .await?;

    enqueue_or_log(&state, Notification::appointment_requested(&appointment)).await;
    Ok(HttpResponse::Created().json(AppointmentResponse::from(&appointment)))
}

/// Overwrite an appointment's status.
///
/// The status path segment must parse into the closed set; anything else is
/// a 400. An unknown id is a 404, never a silent no-op. No terminal-state
/// guard exists: a decided appointment may be re-decided.
#[get("/update/{id}/{status}")]
pub async fn update_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(i32, String)>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Vet)?;

    let (id, raw_status) = path.into_inner();
    let status = raw_status
        .parse::<AppointmentStatus>()
        .map_err(|error| invalid_field_error("status", error))?;

    let appointment = state
        .appointments
        .update_status(id, status)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("no appointment with id {id}")))?;

    enqueue_or_log(&state, Notification::status_changed(&appointment)).await;
    Ok(HttpResponse::Ok().json(AppointmentResponse::from(&appointment)))
}
