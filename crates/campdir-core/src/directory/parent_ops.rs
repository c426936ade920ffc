//! Parents, favorites, messages and the public contact form.

use jiff::{SignedDuration, Timestamp};
use log::{info, warn};

use super::Directory;
use crate::{
    error::{DirectoryError, Result},
    models::{
        Actor, CampSummary, ContactForm, ContactSubmission, EmailStatus, Message, NewMessage,
        NotificationKind, Parent, ParentRegistration, PasswordReset,
    },
    notify::{templates, Mailer, OutgoingEmail},
};

/// How long a password reset code stays valid.
pub const PASSWORD_RESET_TTL: SignedDuration = SignedDuration::from_hours(1);

/// Sends every email and reports `Sent` only if all of them went out.
fn send_all(mailer: &dyn Mailer, emails: &[OutgoingEmail]) -> EmailStatus {
    let mut status = EmailStatus::Sent;
    for email in emails {
        if let Err(e) = mailer.send(email) {
            warn!("Failed to send '{}' to {}: {e}", email.subject, email.to);
            status = EmailStatus::Failed;
        }
    }
    status
}

impl Directory {
    /// Registers a parent and sends the welcome email (plus a notice to the
    /// admin when one is configured).
    ///
    /// Delivery happens before returning; its outcome is recorded in
    /// `welcome_email_status` and never fails the registration.
    pub async fn register_parent(&self, form: ParentRegistration) -> Result<Parent> {
        let mailer = self.mailer.clone();

        self.with_database(move |db| {
            let mut parent = db.create_parent(form)?;
            let settings = db.get_settings()?;

            let mut emails = vec![templates::welcome(&settings, &parent)];
            if let Some(admin) = settings.admin_email.as_deref() {
                emails.push(templates::registration_notice(&settings, admin, &parent));
            }

            let status = send_all(mailer.as_ref(), &emails);
            db.set_welcome_status(parent.id, status)?;
            parent.welcome_email_status = status;
            Ok(parent)
        })
        .await
    }

    /// Issues a reset code to the parent registered under `email` and
    /// emails it right away. Returns `None` when no parent has that email.
    pub async fn request_password_reset(&self, email: String) -> Result<Option<PasswordReset>> {
        let mailer = self.mailer.clone();

        self.with_database(move |db| {
            let Some(parent) = db.find_parent_by_email(&email)? else {
                info!("Password reset requested for unknown email");
                return Ok(None);
            };
            let settings = db.get_settings()?;

            let mut reset = db.create_password_reset(parent.id, Timestamp::now() + PASSWORD_RESET_TTL)?;
            let email = templates::password_reset(&settings, &parent, &reset);
            reset.email_status = send_all(mailer.as_ref(), std::slice::from_ref(&email));
            Ok(Some(reset))
        })
        .await
    }

    /// Consumes a reset code and returns the parent it belongs to.
    pub async fn redeem_password_reset(&self, token: String) -> Result<Parent> {
        self.with_database(move |db| {
            let parent_id = db.redeem_password_reset(&token, Timestamp::now())?;
            db.get_parent(parent_id)?.ok_or(DirectoryError::RecordNotFound {
                kind: "Parent",
                id: parent_id,
            })
        })
        .await
    }

    pub async fn get_parent(&self, actor: Actor, id: u64) -> Result<Option<Parent>> {
        actor.require_parent(id, "view this account")?;
        self.with_database(move |db| db.get_parent(id)).await
    }

    /// Adds or removes a favorite; returns whether the camp is now saved.
    pub async fn toggle_favorite(&self, actor: Actor, parent_id: u64, camp_id: u64) -> Result<bool> {
        actor.require_parent(parent_id, "manage these favorites")?;
        self.with_database(move |db| db.toggle_favorite(parent_id, camp_id))
            .await
    }

    pub async fn list_favorites(&self, actor: Actor, parent_id: u64) -> Result<Vec<CampSummary>> {
        actor.require_parent(parent_id, "view these favorites")?;
        self.with_database(move |db| db.list_favorites(parent_id))
            .await
    }

    /// Stores a parent's message and queues it for the director's next
    /// digest when the camp has a contact email. A message that cannot be
    /// queued is not stored either.
    pub async fn send_message(&self, actor: Actor, message: NewMessage) -> Result<Message> {
        actor.require_parent(message.parent_id, "send messages as this parent")?;

        self.with_database(move |db| db.atomically(|db| {
            let message = db.create_message(message)?;
            let camp = db
                .get_camp(message.camp_id)?
                .ok_or(DirectoryError::CampNotFound { id: message.camp_id })?;
            let parent = db.get_parent(message.parent_id)?.ok_or(
                DirectoryError::RecordNotFound {
                    kind: "Parent",
                    id: message.parent_id,
                },
            )?;

            match camp.email.as_deref() {
                Some(email) => {
                    let (subject, body) = templates::message_digest_item(&camp, &parent, &message);
                    db.enqueue(NotificationKind::DigestItem, email, &subject, &body)?;
                }
                None => info!("Camp {} has no email; message {} not queued", camp.id, message.id),
            }

            Ok(message)
        }))
        .await
    }

    /// Messages sent to a camp, newest first.
    pub async fn list_messages(&self, actor: Actor, camp_id: u64) -> Result<Vec<Message>> {
        actor.require_camp_editor(camp_id, "read this camp's messages")?;
        self.with_database(move |db| db.list_messages(camp_id)).await
    }

    pub async fn mark_message_read(&self, actor: Actor, id: u64) -> Result<()> {
        self.with_database(move |db| {
            let message = db
                .get_message(id)?
                .ok_or(DirectoryError::RecordNotFound { kind: "Message", id })?;
            actor.require_camp_editor(message.camp_id, "read this camp's messages")?;
            db.mark_message_read(id)
        })
        .await
    }

    /// Stores a contact form submission, acknowledges it to the sender and
    /// forwards it to the admin. The delivery outcome is recorded on the
    /// submission.
    pub async fn submit_contact(&self, form: ContactForm) -> Result<ContactSubmission> {
        let mailer = self.mailer.clone();

        self.with_database(move |db| {
            let mut submission = db.create_contact(form)?;
            let settings = db.get_settings()?;

            let mut emails = vec![templates::contact_acknowledgment(&settings, &submission)];
            if let Some(admin) = settings.admin_email.as_deref() {
                emails.push(templates::contact_notice(&settings, admin, &submission));
            }

            let status = send_all(mailer.as_ref(), &emails);
            db.set_contact_status(submission.id, status)?;
            submission.email_status = status;
            Ok(submission)
        })
        .await
    }
}
