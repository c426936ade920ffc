//! Outbound notification queue.
//!
//! Rows move `pending` → `sending` → `sent` | `failed`. The move to
//! `sending` is a conditional update so two overlapping flushes can never
//! both claim the same row. Each claim records when it was taken; a claim
//! left behind by a flush that died can be handed back to `pending`.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{get_enum, get_id, get_optional_timestamp, get_timestamp};
use crate::{
    error::{DatabaseResultExt, DirectoryError, Result},
    models::{NotificationKind, QueueStats, QueueStatus, QueuedNotification},
};

const QUEUE_COLUMNS: &str = "id, kind, recipient, subject, body, status, error, created_at, sent_at";

fn build_notification_from_row(row: &Row) -> rusqlite::Result<QueuedNotification> {
    Ok(QueuedNotification {
        id: get_id(row, 0)?,
        kind: get_enum(row, 1)?,
        recipient: row.get(2)?,
        subject: row.get(3)?,
        body: row.get(4)?,
        status: get_enum(row, 5)?,
        error: row.get(6)?,
        created_at: get_timestamp(row, 7)?,
        sent_at: get_optional_timestamp(row, 8)?,
    })
}

impl super::Database {
    /// Adds a pending notification.
    pub fn enqueue(
        &mut self,
        kind: NotificationKind,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<QueuedNotification> {
        let now = Timestamp::now();
        self.connection
            .execute(
                "INSERT INTO notification_queue (kind, recipient, subject, body, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    kind.as_str(),
                    recipient,
                    subject,
                    body,
                    QueueStatus::Pending.as_str(),
                    now.to_string()
                ],
            )
            .db_context("Failed to enqueue notification")?;

        Ok(QueuedNotification {
            id: self.connection.last_insert_rowid() as u64,
            kind,
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            status: QueueStatus::Pending,
            error: None,
            created_at: now,
            sent_at: None,
        })
    }

    /// Pending rows of one kind in arrival order.
    pub fn pending(&self, kind: NotificationKind) -> Result<Vec<QueuedNotification>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {QUEUE_COLUMNS} FROM notification_queue WHERE kind = ?1 AND status = ?2 ORDER BY id"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(
                params![kind.as_str(), QueueStatus::Pending.as_str()],
                build_notification_from_row,
            )
            .db_context("Failed to query notification queue")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch notification queue");
        rows
    }

    /// Moves a row from `pending` to `sending`, stamped with `at`. Returns
    /// false when another flush already took it.
    pub fn claim(&mut self, id: u64, at: Timestamp) -> Result<bool> {
        let rows = self
            .connection
            .execute(
                "UPDATE notification_queue SET status = ?1, claimed_at = ?2 WHERE id = ?3 AND status = ?4",
                params![
                    QueueStatus::Sending.as_str(),
                    at.as_second(),
                    id as i64,
                    QueueStatus::Pending.as_str()
                ],
            )
            .db_context("Failed to claim notification")?;
        Ok(rows == 1)
    }

    /// Hands a claimed row back to `pending`.
    pub fn release(&mut self, id: u64) -> Result<()> {
        self.connection
            .execute(
                "UPDATE notification_queue SET status = ?1, claimed_at = NULL WHERE id = ?2 AND status = ?3",
                params![
                    QueueStatus::Pending.as_str(),
                    id as i64,
                    QueueStatus::Sending.as_str()
                ],
            )
            .db_context("Failed to release notification")?;
        Ok(())
    }

    /// Returns every row claimed before `before` to `pending` and reports
    /// how many moved. Rows in `sending` without a claim time are treated
    /// as stale.
    pub fn release_stale_claims(&mut self, before: Timestamp) -> Result<usize> {
        let rows = self
            .connection
            .execute(
                "UPDATE notification_queue SET status = ?1, claimed_at = NULL WHERE status = ?2 AND (claimed_at IS NULL OR claimed_at < ?3)",
                params![
                    QueueStatus::Pending.as_str(),
                    QueueStatus::Sending.as_str(),
                    before.as_second()
                ],
            )
            .db_context("Failed to release stale notifications")?;
        if rows > 0 {
            warn!("Returned {rows} stale notification claims to the queue");
        }
        Ok(rows)
    }

    pub fn mark_sent(&mut self, id: u64) -> Result<()> {
        self.finish(id, QueueStatus::Sent, None)
    }

    pub fn mark_failed(&mut self, id: u64, error: &str) -> Result<()> {
        self.finish(id, QueueStatus::Failed, Some(error))
    }

    fn finish(&mut self, id: u64, status: QueueStatus, error: Option<&str>) -> Result<()> {
        let sent_at = (status == QueueStatus::Sent).then(|| Timestamp::now().to_string());
        let rows = self
            .connection
            .execute(
                "UPDATE notification_queue SET status = ?1, error = ?2, sent_at = ?3 WHERE id = ?4",
                params![status.as_str(), error, sent_at, id as i64],
            )
            .db_context("Failed to update notification status")?;
        if rows == 0 {
            return Err(DirectoryError::RecordNotFound {
                kind: "Notification",
                id,
            });
        }
        Ok(())
    }

    pub fn get_notification(&self, id: u64) -> Result<Option<QueuedNotification>> {
        self.connection
            .query_row(
                &format!("SELECT {QUEUE_COLUMNS} FROM notification_queue WHERE id = ?1"),
                params![id as i64],
                build_notification_from_row,
            )
            .optional()
            .db_context("Failed to query notification")
    }

    /// Row counts per status.
    pub fn queue_stats(&self) -> Result<QueueStats> {
        let mut stmt = self
            .connection
            .prepare("SELECT status, COUNT(*) FROM notification_queue GROUP BY status")
            .db_context("Failed to prepare query")?;

        let counts = stmt
            .query_map([], |row| Ok((get_enum::<QueueStatus>(row, 0)?, row.get::<_, i64>(1)?)))
            .db_context("Failed to query queue stats")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch queue stats")?;

        let mut stats = QueueStats::default();
        for (status, count) in counts {
            let count = u64::try_from(count).unwrap_or_default();
            match status {
                QueueStatus::Pending => stats.pending = count,
                QueueStatus::Sending => stats.sending = count,
                QueueStatus::Sent => stats.sent = count,
                QueueStatus::Failed => stats.failed = count,
            }
        }
        Ok(stats)
    }
}
