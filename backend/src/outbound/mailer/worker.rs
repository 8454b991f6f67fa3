//! Background worker that drains the notification outbox.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{MailTransport, NotificationOutbox, OutboxError};

const BATCH_SIZE: i64 = 50;

/// Periodic drain of queued notifications through the mail transport.
///
/// An entry is marked sent strictly after the transport accepts it, so a
/// crash between the two re-delivers on the next poll rather than losing
/// the message. Delivery is therefore at-least-once; duplicate emails are
/// acceptable, dropped ones are not.
pub struct OutboxWorker {
    outbox: Arc<dyn NotificationOutbox>,
    transport: Arc<dyn MailTransport>,
    poll_interval: Duration,
}

impl OutboxWorker {
    /// Create a worker over the given outbox and transport.
    pub fn new(
        outbox: Arc<dyn NotificationOutbox>,
        transport: Arc<dyn MailTransport>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            outbox,
            transport,
            poll_interval,
        }
    }

    /// Poll the outbox forever. Intended to run as a spawned task.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.drain_once().await {
                Ok(0) => {}
                Ok(delivered) => tracing::info!(delivered, "notification outbox drained"),
                Err(err) => tracing::warn!(error = %err, "notification outbox poll failed"),
            }
        }
    }

    /// Deliver one batch of pending entries, returning how many succeeded.
    ///
    /// A failed delivery records the attempt and leaves the entry queued
    /// for the next poll.
    pub async fn drain_once(&self) -> Result<usize, OutboxError> {
        let pending = self.outbox.pending(BATCH_SIZE).await?;
        let mut delivered = 0;
        for entry in pending {
            match self.transport.deliver(&entry).await {
                Ok(()) => {
                    self.outbox.mark_sent(entry.id()).await?;
                    delivered += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        id = entry.id(),
                        attempts = entry.attempts(),
                        error = %err,
                        "notification delivery failed; will retry"
                    );
                    self.outbox.record_failure(entry.id()).await?;
                }
            }
        }
        Ok(delivered)
    }
}
