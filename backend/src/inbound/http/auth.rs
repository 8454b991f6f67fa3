//! Authentication handlers: login, registration, logout.
//!
//! ```text
//! POST /          — login with username/password
//! POST /register  — create an account with a closed-set role
//! GET  /logout    — clear the session unconditionally
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, LoginCredentials, NewUser, PasswordHash, Role, Username};
use crate::inbound::http::session::{CurrentUser, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_field_error;
use crate::inbound::http::ApiResult;

/// Request payload for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request payload for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Identity echoed back after login or registration.
#[derive(Debug, Serialize)]
pub struct SessionUserResponse {
    pub username: String,
    pub role: Role,
}

impl From<&CurrentUser> for SessionUserResponse {
    fn from(value: &CurrentUser) -> Self {
        Self {
            username: value.username.to_string(),
            role: value.role,
        }
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::unauthorized("invalid credentials")
}

/// Authenticate and populate the session cookie.
///
/// A wrong password or unknown username yields 401 and never touches the
/// session.
#[post("/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(|error| DomainError::invalid_request(error.to_string()))?;
    // Malformed usernames cannot exist in the store; report them exactly
    // like a failed lookup.
    let username = Username::new(credentials.username()).map_err(|_| invalid_credentials())?;

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password = credentials.password().to_owned();
    let hash = user.password_hash().clone();
    let verified = tokio::task::spawn_blocking(move || hash.verify(&password))
        .await
        .map_err(|error| DomainError::internal(format!("verification task failed: {error}")))?;
    if !verified {
        return Err(invalid_credentials().into());
    }

    let current = CurrentUser {
        username: user.username().clone(),
        role: user.role(),
    };
    session.persist(&current)?;
    Ok(HttpResponse::Ok().json(SessionUserResponse::from(&current)))
}

/// Create an account with a hashed password and a closed-set role.
///
/// Duplicate usernames are rejected with 409, both by the pre-check here
/// and by the storage uniqueness constraint underneath it.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let username = Username::new(&payload.username)
        .map_err(|error| invalid_field_error("username", error))?;
    let role = payload
        .role
        .parse::<Role>()
        .map_err(|error| invalid_field_error("role", error))?;
    if payload.password.is_empty() {
        return Err(invalid_field_error("password", "must not be empty").into());
    }

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(DomainError::conflict(format!(
            "username '{username}' is already registered"
        ))
        .into());
    }

    let password = payload.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || PasswordHash::derive(&password))
        .await
        .map_err(|error| DomainError::internal(format!("hashing task failed: {error}")))?
        .map_err(|error| DomainError::internal(error.to_string()))?;

    let user = state
        .users
        .insert(NewUser {
            username,
            password_hash,
            role,
        })
        .await?;

    let current = CurrentUser {
        username: user.username().clone(),
        role: user.role(),
    };
    Ok(HttpResponse::Created().json(SessionUserResponse::from(&current)))
}

/// Clear the entire session unconditionally.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}
