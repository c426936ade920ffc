//! SMTP delivery through `lettre`.
//!
//! The relay is configured from the environment:
//!
//! | Variable                | Required | Default |
//! |-------------------------|----------|---------|
//! | `CAMPDIR_SMTP_HOST`     | yes      |         |
//! | `CAMPDIR_SMTP_PORT`     | no       | `587`   |
//! | `CAMPDIR_SMTP_USER`     | no       |         |
//! | `CAMPDIR_SMTP_PASSWORD` | no       |         |
//!
//! Without a host the mailer still exists but every delivery fails, so the
//! outcome recorded on registrations, contact submissions and queue rows
//! is `failed` rather than a false `sent`.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use log::{debug, info, warn};
use tokio::runtime::Handle;

use super::{Mailer, OutgoingEmail};
use crate::error::{DirectoryError, Result};

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Relay settings for [`SmtpMailer`].
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    /// Reads the relay settings. Returns `None` when `CAMPDIR_SMTP_HOST` is
    /// not set.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("CAMPDIR_SMTP_HOST").ok()?;
        Some(Self {
            host,
            port: std::env::var("CAMPDIR_SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            username: std::env::var("CAMPDIR_SMTP_USER").ok(),
            password: std::env::var("CAMPDIR_SMTP_PASSWORD").ok(),
        })
    }
}

/// Delivers email through an SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    /// Builds a mailer for the relay in `config`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Configuration` if the relay host is not
    /// usable.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| DirectoryError::Configuration {
                message: format!("Invalid SMTP relay '{}': {e}", config.host),
            })?
            .port(config.port);

        if let (Some(user), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: Some(builder.build()),
        })
    }

    /// A mailer that refuses every delivery.
    pub fn unconfigured() -> Self {
        Self { transport: None }
    }

    /// Uses [`SmtpConfig::from_env`]. A missing or unusable relay yields an
    /// unconfigured mailer.
    pub fn from_env() -> Self {
        match SmtpConfig::from_env() {
            Some(config) => Self::new(&config).unwrap_or_else(|e| {
                warn!("{e}; outgoing email is disabled");
                Self::unconfigured()
            }),
            None => {
                debug!("CAMPDIR_SMTP_HOST not set; outgoing email is disabled");
                Self::unconfigured()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }
}

fn mailbox(address: &str, recipient: &str) -> Result<Mailbox> {
    address.parse().map_err(|e| DirectoryError::Mail {
        recipient: recipient.to_string(),
        reason: format!("invalid address '{address}': {e}"),
    })
}

impl Mailer for SmtpMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let failure = |reason: String| DirectoryError::Mail {
            recipient: email.to.clone(),
            reason,
        };

        let Some(transport) = &self.transport else {
            return Err(failure("SMTP is not configured".to_string()));
        };

        let message = Message::builder()
            .from(mailbox(&email.from, &email.to)?)
            .to(mailbox(&email.to, &email.to)?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| failure(format!("could not build message: {e}")))?;

        // Delivery runs on the blocking pool, outside any async task.
        let runtime = Handle::try_current().map_err(|e| failure(format!("no async runtime: {e}")))?;
        runtime
            .block_on(transport.send(message))
            .map_err(|e| failure(format!("SMTP error: {e}")))?;

        info!("Mail sent to {}: {}", email.to, email.subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "parent@example.com".to_string(),
            from: "noreply@example.com".to_string(),
            subject: "Welcome".to_string(),
            html_body: "<p>Hi</p>".to_string(),
        }
    }

    #[test]
    fn test_unconfigured_mailer_reports_failure() {
        let mailer = SmtpMailer::unconfigured();
        assert!(!mailer.is_configured());

        let err = mailer.send(&email()).unwrap_err();
        match err {
            DirectoryError::Mail { recipient, reason } => {
                assert_eq!(recipient, "parent@example.com");
                assert!(reason.contains("not configured"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
