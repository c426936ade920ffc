//! Queue flushing and the daily director digest.

use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp, Zoned};
use log::{debug, info, warn};

use super::{templates, Mailer, OutgoingEmail};
use crate::{
    db::Database,
    error::Result,
    models::{DigestReport, NotificationKind, QueuedNotification, SettingKey, Settings},
};

/// The digest is due once a day, after the configured local hour.
pub fn digest_due(settings: &Settings, now: &Zoned) -> bool {
    let today = now.date();
    now.hour() >= i8::try_from(settings.digest_hour).unwrap_or(i8::MAX)
        && settings.last_digest_date.map_or(true, |last| last < today)
}

/// How long a row may sit in `sending` before a later run takes it back.
pub const CLAIM_LEASE: SignedDuration = SignedDuration::from_mins(15);

/// Flushes the notification queue.
///
/// Claims older than [`CLAIM_LEASE`] are first returned to `pending`.
/// Direct notifications are sent on every run. Digest items are sent when
/// the digest is due or `force` is set: one email per recipient carries all
/// of that recipient's items. Rows are claimed one recipient at a time,
/// right before that email goes out. A row whose email fails is marked
/// failed and stays failed.
///
/// If an outcome cannot be recorded, the affected rows are handed back to
/// the queue, the remaining recipients are still served, and the first
/// such error is returned without recording the run date.
pub fn run_digest(
    db: &mut Database,
    mailer: &dyn Mailer,
    now: &Zoned,
    force: bool,
) -> Result<DigestReport> {
    let settings = db.get_settings()?;
    let stamp = now.timestamp();
    let mut report = DigestReport::default();
    let mut first_error = None;

    db.release_stale_claims(stamp - CLAIM_LEASE)?;

    for item in db.pending(NotificationKind::Direct)? {
        let email = OutgoingEmail {
            to: item.recipient.clone(),
            from: settings.from_email.clone(),
            subject: item.subject.clone(),
            html_body: item.body.clone(),
        };
        let outcome = claim_and_deliver(db, mailer, stamp, vec![item], |_| email, &mut report);
        if let Err(e) = outcome {
            first_error.get_or_insert(e);
        }
    }

    if !force && !digest_due(&settings, now) {
        debug!("Digest not due (hour {}, last run {:?})", settings.digest_hour, settings.last_digest_date);
        return first_error.map_or(Ok(report), Err);
    }
    report.ran = true;

    let mut batches: BTreeMap<String, Vec<QueuedNotification>> = BTreeMap::new();
    for item in db.pending(NotificationKind::DigestItem)? {
        batches.entry(item.recipient.clone()).or_default().push(item);
    }

    for (recipient, items) in batches {
        let outcome = claim_and_deliver(
            db,
            mailer,
            stamp,
            items,
            |claimed| templates::digest(&settings, &recipient, claimed),
            &mut report,
        );
        if let Err(e) = outcome {
            first_error.get_or_insert(e);
        }
    }

    info!(
        "Digest run: {} emails sent, {} items sent, {} items failed",
        report.emails_sent, report.items_sent, report.items_failed
    );

    if let Some(e) = first_error {
        return Err(e);
    }
    db.set_setting(SettingKey::LastDigestDate, &now.date().to_string())?;
    Ok(report)
}

/// Claims `items`, sends one email covering the ones this run won and
/// records the outcome on each row. Claimed rows whose outcome could not
/// be recorded go back to `pending`.
fn claim_and_deliver(
    db: &mut Database,
    mailer: &dyn Mailer,
    stamp: Timestamp,
    items: Vec<QueuedNotification>,
    render: impl FnOnce(&[QueuedNotification]) -> OutgoingEmail,
    report: &mut DigestReport,
) -> Result<()> {
    let mut claimed = Vec::with_capacity(items.len());
    for item in items {
        if db.claim(item.id, stamp)? {
            claimed.push(item);
        }
    }
    if claimed.is_empty() {
        return Ok(());
    }

    let email = render(&claimed);
    let outcome = deliver(db, mailer, &email, &claimed, report);
    if let Err(e) = &outcome {
        warn!("Failed to record delivery to {}: {e}", email.to);
        for item in &claimed {
            if let Err(e) = db.release(item.id) {
                warn!("Notification {} stays claimed until its lease ends: {e}", item.id);
            }
        }
    }
    outcome
}

fn count(items: &[QueuedNotification]) -> u32 {
    u32::try_from(items.len()).unwrap_or(u32::MAX)
}

/// Sends one email covering `items` and records the outcome on each row.
fn deliver(
    db: &mut Database,
    mailer: &dyn Mailer,
    email: &OutgoingEmail,
    items: &[QueuedNotification],
    report: &mut DigestReport,
) -> Result<()> {
    match mailer.send(email) {
        Ok(()) => {
            report.emails_sent += 1;
            for item in items {
                db.mark_sent(item.id)?;
            }
            report.items_sent += count(items);
        }
        Err(e) => {
            warn!("Failed to deliver notification email to {}: {e}", email.to);
            let reason = e.to_string();
            for item in items {
                db.mark_failed(item.id, &reason)?;
            }
            report.items_failed += count(items);
        }
    }
    Ok(())
}
