//! Outbound email: delivery backends, HTML templates and the daily digest.
//!
//! Delivery goes through the [`Mailer`] trait. The library ships three
//! implementations:
//!
//! - [`SmtpMailer`] delivers through an SMTP relay and is the default
//! - [`LogMailer`] writes every email to the log instead of sending it
//! - [`MemoryMailer`] keeps delivered emails in memory and can be switched
//!   into a failing mode
//!
//! Registration and contact emails are sent synchronously by the
//! [`crate::Directory`] facade. Director notifications go through the queue
//! and are delivered by [`run_digest`].

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

pub mod digest;
pub mod smtp;
pub mod templates;

pub use digest::{digest_due, run_digest, CLAIM_LEASE};
pub use smtp::{SmtpConfig, SmtpMailer};

/// A rendered email ready for delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html_body: String,
}

/// Delivery backend.
pub trait Mailer: Send + Sync {
    /// Delivers one email. An error means the recipient did not get it.
    fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

/// Logs emails at `info` level instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()> {
        info!(
            "Mail from {} to {}: {} ({} bytes)",
            email.from,
            email.to,
            email.subject,
            email.html_body.len()
        );
        Ok(())
    }
}

/// Records delivered emails in memory. Clones share the same mailbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following delivery fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Emails delivered so far, oldest first.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Emails delivered to one address.
    pub fn sent_to(&self, recipient: &str) -> Vec<OutgoingEmail> {
        self.sent()
            .into_iter()
            .filter(|email| email.to == recipient)
            .collect()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DirectoryError::Mail {
                recipient: email.to.clone(),
                reason: "mailbox unavailable".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.clone());
        Ok(())
    }
}
