//! Vaccination ledger handlers.
//!
//! ```text
//! POST /vaccination — vet appends a ledger entry
//! GET  /vaccination — vet lists the ledger
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{NewVaccination, PetName, Role, VaccinationRecord};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_field_error, parse_date};
use crate::inbound::http::ApiResult;

/// Request payload for recording a vaccination.
#[derive(Debug, Deserialize)]
pub struct VaccinationRequest {
    pub pet_name: String,
    pub vaccine: String,
    pub given_date: String,
    pub next_due: String,
}

/// Ledger entry as returned by the endpoints.
#[derive(Debug, Serialize)]
pub struct VaccinationResponse {
    pub id: i32,
    pub pet_name: String,
    pub vaccine: String,
    pub given_date: String,
    pub next_due: String,
}

impl From<&VaccinationRecord> for VaccinationResponse {
    fn from(value: &VaccinationRecord) -> Self {
        Self {
            id: value.id(),
            pet_name: value.pet_name().to_string(),
            vaccine: value.vaccine().to_owned(),
            given_date: value.given_date().to_string(),
            next_due: value.next_due().to_string(),
        }
    }
}

/// Append an entry to the vaccination ledger.
#[post("/vaccination")]
pub async fn record_vaccination(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VaccinationRequest>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Vet)?;

    let pet_name =
        PetName::new(&payload.pet_name).map_err(|error| invalid_field_error("pet_name", error))?;
    let given_date = parse_date("given_date", &payload.given_date)?;
    let next_due = parse_date("next_due", &payload.next_due)?;
    let record = NewVaccination::try_new(pet_name, &payload.vaccine, given_date, next_due)
        .map_err(|error| invalid_field_error("vaccine", error))?;

    let stored = state.vaccinations.insert(record).await?;
    Ok(HttpResponse::Created().json(VaccinationResponse::from(&stored)))
}

/// List the whole vaccination ledger in insertion order.
#[get("/vaccination")]
pub async fn list_vaccinations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Vet)?;
    let records = state.vaccinations.list_all().await?;
    let body: Vec<VaccinationResponse> = records.iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}
