//! Field-level validation helpers shared by the HTTP handlers.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::DomainError;

/// Build the standard envelope for a field that failed validation.
pub(crate) fn invalid_field_error(field: &str, message: impl std::fmt::Display) -> DomainError {
    DomainError::invalid_request(format!("{field}: {message}")).with_details(json!({
        "field": field,
    }))
}

/// Parse an ISO calendar date (`YYYY-MM-DD`), rejecting malformed input.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_field_error(field, "must be a calendar date in YYYY-MM-DD format"))
}
