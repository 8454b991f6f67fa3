//! Analytics and the per-pet PDF health report.
//!
//! ```text
//! GET /analytics    — per-status appointment counts
//! GET /report/{pet} — single-page PDF of the pet's vaccination history
//! ```

use actix_web::{get, web, HttpResponse};

use crate::domain::{DomainError, PetName, Role};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_field_error;
use crate::inbound::http::ApiResult;
use crate::outbound::report::render_health_report;

/// Per-status appointment totals.
#[get("/analytics")]
pub async fn analytics(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Vet)?;
    let counts = state.appointments.status_counts().await?;
    Ok(HttpResponse::Ok().json(counts))
}

/// Render the vaccination history for one pet as a downloadable PDF.
///
/// The page has a fixed line capacity; history beyond it is truncated.
#[get("/report/{pet}")]
pub async fn report(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Vet)?;

    let pet = PetName::new(path.into_inner()).map_err(|error| invalid_field_error("pet", error))?;
    let records = state.vaccinations.list_for_pet(&pet).await?;
    let pdf = render_health_report(&pet, &records)
        .map_err(|error| DomainError::internal(error.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"health_report.pdf\"",
        ))
        .body(pdf))
}
