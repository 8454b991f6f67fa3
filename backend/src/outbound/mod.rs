//! Outbound adapters implementing the domain ports.

pub mod mailer;
pub mod persistence;
pub mod report;
