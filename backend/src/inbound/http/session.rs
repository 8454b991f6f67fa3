//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! a typed [`CurrentUser`] instead of raw cookie keys. An unauthenticated
//! request to a guarded route yields a clean 401, never a crash, and a role
//! mismatch yields 403.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{DomainError, Role, Username};

pub(crate) const USER_KEY: &str = "user";
pub(crate) const ROLE_KEY: &str = "role";

/// Authenticated identity carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: Username,
    pub role: Role,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist(&self, user: &CurrentUser) -> Result<(), DomainError> {
        self.0
            .insert(USER_KEY, user.username.as_ref())
            .and_then(|()| self.0.insert(ROLE_KEY, user.role.as_str()))
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// Clear the entire session unconditionally.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Fetch the current identity from the session, if present and valid.
    ///
    /// A tampered or stale cookie reads as unauthenticated rather than
    /// failing the request.
    pub fn current_user(&self) -> Result<Option<CurrentUser>, DomainError> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| DomainError::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_user), Some(raw_role)) = (read(USER_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };

        let username = match Username::new(&raw_user) {
            Ok(username) => username,
            Err(error) => {
                tracing::warn!("invalid username in session cookie: {error}");
                return Ok(None);
            }
        };
        let role = match raw_role.parse::<Role>() {
            Ok(role) => role,
            Err(error) => {
                tracing::warn!("invalid role in session cookie: {error}");
                return Ok(None);
            }
        };
        Ok(Some(CurrentUser { username, role }))
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<CurrentUser, DomainError> {
        self.current_user()?
            .ok_or_else(|| DomainError::unauthorized("login required"))
    }

    /// Require an authenticated identity with the given role or return
    /// `403 Forbidden` (401 when not logged in at all).
    pub fn require_role(&self, role: Role) -> Result<CurrentUser, DomainError> {
        let user = self.require_user()?;
        if user.role != role {
            return Err(DomainError::forbidden(format!(
                "this action requires the {role} role"
            )));
        }
        Ok(user)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
