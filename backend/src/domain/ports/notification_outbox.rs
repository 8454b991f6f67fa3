//! Port abstraction for the durable notification outbox.
//!
//! The outbox decouples email delivery from the request path: handlers only
//! enqueue, and the mailer worker owns delivery and retry. An entry is
//! marked sent strictly after the transport succeeds, giving at-least-once
//! semantics.

use async_trait::async_trait;

use crate::domain::{Notification, QueuedNotification};

/// Errors raised by outbox adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutboxError {
    /// Outbox storage could not be reached.
    #[error("notification outbox connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("notification outbox query failed: {message}")]
    Query { message: String },
}

impl OutboxError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable queue of notifications awaiting delivery.
#[async_trait]
pub trait NotificationOutbox: Send + Sync {
    /// Persist a notification for later delivery.
    async fn enqueue(&self, notification: Notification) -> Result<(), OutboxError>;

    /// Oldest undelivered entries, up to `limit`.
    async fn pending(&self, limit: i64) -> Result<Vec<QueuedNotification>, OutboxError>;

    /// Mark an entry as delivered. Idempotent.
    async fn mark_sent(&self, id: i32) -> Result<(), OutboxError>;

    /// Record a failed delivery attempt, leaving the entry queued.
    async fn record_failure(&self, id: i32) -> Result<(), OutboxError>;
}
