//! HTTP adapter: handlers, DTOs, error envelope, and session context.
//!
//! Handlers accept dependencies via [`state::HttpState`] and the
//! authenticated identity via [`session::SessionContext`], so they stay
//! free of ambient state and are testable with stub ports.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod reports;
pub mod session;
pub mod state;
pub mod vaccinations;
mod validation;

pub use error::ApiError;
pub use session::{CurrentUser, SessionContext};
pub use state::HttpState;

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
