//! Diesel-backed adapter for the [`NotificationOutbox`] port.
//!
//! Entries stay queued until `mark_sent` stamps `sent_at`, so a crash
//! between transport success and the stamp re-delivers rather than drops.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{NotificationOutbox, OutboxError};
use crate::domain::{Notification, QueuedNotification};

use super::models::{NewOutboxRow, OutboxRow};
use super::pool::DbPool;
use super::schema::email_outbox;

/// SQLite-backed notification outbox.
#[derive(Clone)]
pub struct DieselNotificationOutbox {
    pool: DbPool,
}

impl DieselNotificationOutbox {
    /// Create an adapter over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationOutbox for DieselNotificationOutbox {
    async fn enqueue(&self, notification: Notification) -> Result<(), OutboxError> {
        let pool = self.pool.clone();
        let row = NewOutboxRow {
            subject: notification.subject().to_owned(),
            body: notification.body().to_owned(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| OutboxError::connection(err.to_string()))?;
                diesel::insert_into(email_outbox::table)
                    .values(&row)
                    .execute(&mut conn)
                    .map_err(|err| OutboxError::query(err.to_string()))?;
                Ok(())
            },
            OutboxError::query,
        )
        .await
    }

    async fn pending(&self, limit: i64) -> Result<Vec<QueuedNotification>, OutboxError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| OutboxError::connection(err.to_string()))?;
                let rows: Vec<OutboxRow> = email_outbox::table
                    .filter(email_outbox::sent_at.is_null())
                    .order(email_outbox::id.asc())
                    .limit(limit)
                    .select((
                        email_outbox::id,
                        email_outbox::subject,
                        email_outbox::body,
                        email_outbox::attempts,
                    ))
                    .load(&mut conn)
                    .map_err(|err| OutboxError::query(err.to_string()))?;
                Ok(rows.into_iter().map(OutboxRow::into_domain).collect())
            },
            OutboxError::query,
        )
        .await
    }

    async fn mark_sent(&self, id: i32) -> Result<(), OutboxError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| OutboxError::connection(err.to_string()))?;
                diesel::update(
                    email_outbox::table
                        .find(id)
                        .filter(email_outbox::sent_at.is_null()),
                )
                .set(email_outbox::sent_at.eq(chrono::Utc::now().naive_utc()))
                .execute(&mut conn)
                .map_err(|err| OutboxError::query(err.to_string()))?;
                Ok(())
            },
            OutboxError::query,
        )
        .await
    }

    async fn record_failure(&self, id: i32) -> Result<(), OutboxError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| OutboxError::connection(err.to_string()))?;
                diesel::update(email_outbox::table.find(id))
                    .set(email_outbox::attempts.eq(email_outbox::attempts + 1))
                    .execute(&mut conn)
                    .map_err(|err| OutboxError::query(err.to_string()))?;
                Ok(())
            },
            OutboxError::query,
        )
        .await
    }
}
