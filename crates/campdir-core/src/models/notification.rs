//! Queued outbound notifications.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// What a queued notification is for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// One entry of a director's daily digest; delivered batched
    DigestItem,
    /// Stand-alone email delivered on the next flush
    Direct,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::DigestItem => "digest_item",
            NotificationKind::Direct => "direct",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digest_item" => Ok(NotificationKind::DigestItem),
            "direct" => Ok(NotificationKind::Direct),
            _ => Err(format!("Invalid notification kind: {s}")),
        }
    }
}

/// Lifecycle of a queue row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    /// Waiting for the next flush
    Pending,
    /// Claimed by a running flush
    Sending,
    Sent,
    /// Delivery failed; never retried automatically
    Failed,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Pending => "pending",
            QueueStatus::Sending => "sending",
            QueueStatus::Sent => "sent",
            QueueStatus::Failed => "failed",
        }
    }
}

impl FromStr for QueueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QueueStatus::Pending),
            "sending" => Ok(QueueStatus::Sending),
            "sent" => Ok(QueueStatus::Sent),
            "failed" => Ok(QueueStatus::Failed),
            _ => Err(format!("Invalid queue status: {s}")),
        }
    }
}

/// A row of the notification queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueuedNotification {
    pub id: u64,
    pub kind: NotificationKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: QueueStatus,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub sent_at: Option<Timestamp>,
}

/// Row counts per queue status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueStats {
    pub pending: u64,
    pub sending: u64,
    pub sent: u64,
    pub failed: u64,
}

/// What one digest run did.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DigestReport {
    /// False when the digest was not due and nothing was attempted
    pub ran: bool,
    /// Emails delivered (one per recipient for digests)
    pub emails_sent: u32,
    /// Queue rows marked sent
    pub items_sent: u32,
    /// Queue rows marked failed
    pub items_failed: u32,
}
