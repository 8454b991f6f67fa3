//! Email delivery: SMTP transport and the outbox drain worker.
//!
//! Handlers never send mail. They enqueue notifications into the durable
//! outbox and this module's worker drains it in the background, retrying
//! failed deliveries on the next poll. A deployment without SMTP settings
//! falls back to [`LogMailer`], which records deliveries in the log stream
//! instead of dropping them silently.

mod smtp;
mod worker;

pub use smtp::{LogMailer, SmtpMailer, SmtpSettings};
pub use worker::OutboxWorker;
