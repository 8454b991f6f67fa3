//! Read-only appointment views.
//!
//! ```text
//! GET /dashboard — owner: own appointments; vet: every appointment
//! GET /calendar  — every appointment, for any authenticated user
//! ```

use actix_web::{get, web, HttpResponse};

use crate::domain::Role;
use crate::inbound::http::appointments::AppointmentResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Role-dependent appointment listing.
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    let appointments = match user.role {
        Role::Owner => state.appointments.list_for_owner(&user.username).await?,
        Role::Vet => state.appointments.list_all().await?,
    };
    let body: Vec<AppointmentResponse> = appointments.iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Clinic-wide appointment listing for any authenticated user.
#[get("/calendar")]
pub async fn calendar(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let appointments = state.appointments.list_all().await?;
    let body: Vec<AppointmentResponse> = appointments.iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}
