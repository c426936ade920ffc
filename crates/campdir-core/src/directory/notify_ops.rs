//! Digest runs, queue status and site settings.

use jiff::Zoned;

use super::Directory;
use crate::{
    error::Result,
    models::{Actor, DigestReport, QueueStats, SettingKey, Settings},
    notify,
};

impl Directory {
    /// Flushes the notification queue at the current local time.
    pub async fn run_digest(&self, actor: Actor, force: bool) -> Result<DigestReport> {
        self.run_digest_at(actor, Zoned::now(), force).await
    }

    /// Flushes the notification queue as if it were `now`.
    pub async fn run_digest_at(&self, actor: Actor, now: Zoned, force: bool) -> Result<DigestReport> {
        actor.require_admin("run the digest")?;
        let mailer = self.mailer.clone();
        self.with_database(move |db| notify::run_digest(db, mailer.as_ref(), &now, force))
            .await
    }

    pub async fn queue_stats(&self, actor: Actor) -> Result<QueueStats> {
        actor.require_admin("view the notification queue")?;
        self.with_database(|db| db.queue_stats()).await
    }

    pub async fn get_settings(&self) -> Result<Settings> {
        self.with_database(|db| db.get_settings()).await
    }

    /// Validates and stores one setting; returns the stored value.
    pub async fn set_setting(&self, actor: Actor, key: SettingKey, value: String) -> Result<String> {
        actor.require_admin("change settings")?;
        self.with_database(move |db| db.set_setting(key, &value)).await
    }
}
