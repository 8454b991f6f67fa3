//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`DomainError`] into Actix responses here. Port errors from the
//! persistence adapters are mapped onto the envelope too, so handlers can
//! use `?` throughout.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::ports::{
    AppointmentPersistenceError, OutboxError, UserPersistenceError, VaccinationPersistenceError,
};
use crate::domain::{DomainError, ErrorCode};

/// Standard error envelope returned by HTTP handlers.
///
/// Serialises as `{ "code": …, "message": …, "details"? }`. Internal
/// failures are redacted before leaving the process.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError(DomainError);

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.0.code()
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.0.message()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self(value)
    }
}

impl From<UserPersistenceError> for ApiError {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Duplicate { username } => {
                Self(DomainError::conflict(format!(
                    "username '{username}' is already registered"
                )))
            }
            UserPersistenceError::Connection { message } => {
                Self(DomainError::service_unavailable(message))
            }
            UserPersistenceError::Query { message } => Self(DomainError::internal(message)),
        }
    }
}

impl From<AppointmentPersistenceError> for ApiError {
    fn from(value: AppointmentPersistenceError) -> Self {
        match value {
            AppointmentPersistenceError::Connection { message } => {
                Self(DomainError::service_unavailable(message))
            }
            AppointmentPersistenceError::Query { message } => Self(DomainError::internal(message)),
        }
    }
}

impl From<VaccinationPersistenceError> for ApiError {
    fn from(value: VaccinationPersistenceError) -> Self {
        match value {
            VaccinationPersistenceError::Connection { message } => {
                Self(DomainError::service_unavailable(message))
            }
            VaccinationPersistenceError::Query { message } => Self(DomainError::internal(message)),
        }
    }
}

impl From<OutboxError> for ApiError {
    fn from(value: OutboxError) -> Self {
        match value {
            OutboxError::Connection { message } => Self(DomainError::service_unavailable(message)),
            OutboxError::Query { message } => Self(DomainError::internal(message)),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if matches!(
            self.0.code(),
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(code = ?self.0.code(), message = %self.0.message(), "request failed");
            let redacted = DomainError::new(self.0.code(), "internal server error");
            return builder.json(redacted);
        }
        builder.json(&self.0)
    }
}
