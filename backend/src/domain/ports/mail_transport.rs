//! Port abstraction for the outbound mail transport.

use async_trait::async_trait;

use crate::domain::QueuedNotification;

/// Errors raised by mail transport adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailTransportError {
    /// The message could not be assembled (bad addresses, encoding).
    #[error("mail message could not be built: {message}")]
    Message { message: String },
    /// The relay rejected the message or was unreachable.
    #[error("mail delivery failed: {message}")]
    Delivery { message: String },
}

impl MailTransportError {
    /// Create a message-assembly error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    /// Create a delivery error.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// One-shot delivery of a queued notification.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver the notification. Success means the relay accepted it.
    async fn deliver(&self, notification: &QueuedNotification) -> Result<(), MailTransportError>;
}
