//! Parents, favorites, messages and contact submissions.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    camp_queries::ensure_camp_exists,
    listing_queries::{query_summaries, SUMMARY_COLUMNS},
    utils::{get_enum, get_id, get_timestamp},
};
use crate::{
    error::{DatabaseResultExt, DirectoryError, FieldError, Result},
    models::{
        parent::is_plausible_email, CampSummary, ContactForm, ContactSubmission, EmailStatus,
        Message, NewMessage, Parent, ParentRegistration, PasswordReset,
    },
};

const PARENT_COLUMNS: &str = "id, first_name, last_name, email, phone, city, state, children_count, welcome_email_status, created_at";
const MESSAGE_COLUMNS: &str = "id, parent_id, camp_id, subject, body, is_read, created_at";
const CONTACT_COLUMNS: &str = "id, name, email, subject, message, email_status, created_at";

fn build_parent_from_row(row: &Row) -> rusqlite::Result<Parent> {
    Ok(Parent {
        id: get_id(row, 0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        city: row.get(5)?,
        state: row.get(6)?,
        children_count: row.get(7)?,
        welcome_email_status: get_enum(row, 8)?,
        created_at: get_timestamp(row, 9)?,
    })
}

fn build_message_from_row(row: &Row) -> rusqlite::Result<Message> {
    Ok(Message {
        id: get_id(row, 0)?,
        parent_id: get_id(row, 1)?,
        camp_id: get_id(row, 2)?,
        subject: row.get(3)?,
        body: row.get(4)?,
        read: row.get(5)?,
        created_at: get_timestamp(row, 6)?,
    })
}

fn build_contact_from_row(row: &Row) -> rusqlite::Result<ContactSubmission> {
    Ok(ContactSubmission {
        id: get_id(row, 0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        email_status: get_enum(row, 5)?,
        created_at: get_timestamp(row, 6)?,
    })
}

fn find_parent(conn: &Connection, id: u64) -> Result<Option<Parent>> {
    conn.query_row(
        &format!("SELECT {PARENT_COLUMNS} FROM parents WHERE id = ?1"),
        params![id as i64],
        build_parent_from_row,
    )
    .optional()
    .db_context("Failed to query parent")
}

fn ensure_parent_exists(conn: &Connection, id: u64) -> Result<()> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM parents WHERE id = ?1)",
            params![id as i64],
            |row| row.get(0),
        )
        .db_context("Failed to check parent existence")?;
    if exists {
        Ok(())
    } else {
        Err(DirectoryError::RecordNotFound { kind: "Parent", id })
    }
}

impl super::Database {
    /// Validates and stores a parent registration.
    ///
    /// Field problems and an already registered email are reported together
    /// as one `Validation` error.
    pub fn create_parent(&mut self, mut form: ParentRegistration) -> Result<Parent> {
        let mut errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(DirectoryError::Validation { errors }) => errors,
            Err(e) => return Err(e),
        };

        if is_plausible_email(&form.email) && self.find_parent_by_email(&form.email)?.is_some() {
            errors.push(FieldError::new(
                "email",
                "An account with this email already exists",
            ));
        }
        if !errors.is_empty() {
            return Err(DirectoryError::Validation { errors });
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                "INSERT INTO parents (first_name, last_name, email, phone, city, state, children_count, welcome_email_status, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    form.first_name,
                    form.last_name,
                    form.email,
                    form.phone,
                    form.city,
                    form.state,
                    form.children_count,
                    EmailStatus::Pending.as_str(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert parent")?;

        let id = self.connection.last_insert_rowid() as u64;
        info!("Registered parent {id} <{}>", form.email);

        Ok(Parent {
            id,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            city: form.city,
            state: form.state,
            children_count: form.children_count,
            welcome_email_status: EmailStatus::Pending,
            created_at: now,
        })
    }

    pub fn get_parent(&self, id: u64) -> Result<Option<Parent>> {
        find_parent(&self.connection, id)
    }

    /// Looks a parent up by (case-insensitive) email.
    pub fn find_parent_by_email(&self, email: &str) -> Result<Option<Parent>> {
        self.connection
            .query_row(
                &format!("SELECT {PARENT_COLUMNS} FROM parents WHERE email = ?1"),
                params![email.trim().to_lowercase()],
                build_parent_from_row,
            )
            .optional()
            .db_context("Failed to query parent by email")
    }

    /// Issues a single-use reset token for a parent, replacing any token
    /// the parent has not used yet.
    pub fn create_password_reset(
        &mut self,
        parent_id: u64,
        expires_at: Timestamp,
    ) -> Result<PasswordReset> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        ensure_parent_exists(&tx, parent_id)?;

        tx.execute(
            "DELETE FROM password_resets WHERE parent_id = ?1 AND used_at IS NULL",
            params![parent_id as i64],
        )
        .db_context("Failed to discard earlier reset tokens")?;

        let token: String = tx
            .query_row(
                "INSERT INTO password_resets (token, parent_id, expires_at) \
                 VALUES (lower(hex(randomblob(16))), ?1, ?2) RETURNING token",
                params![parent_id as i64, expires_at.as_second()],
                |row| row.get(0),
            )
            .db_context("Failed to insert reset token")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Issued reset token for parent {parent_id}");
        Ok(PasswordReset {
            parent_id,
            token,
            expires_at,
            email_status: EmailStatus::Pending,
        })
    }

    /// Consumes a reset token and returns the parent it was issued to.
    /// Unknown, used and expired tokens are all rejected the same way.
    pub fn redeem_password_reset(&mut self, token: &str, now: Timestamp) -> Result<u64> {
        let parent_id: Option<i64> = self
            .connection
            .query_row(
                "UPDATE password_resets SET used_at = ?1 \
                 WHERE token = ?2 AND used_at IS NULL AND expires_at > ?3 \
                 RETURNING parent_id",
                params![now.to_string(), token.trim(), now.as_second()],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to redeem reset token")?;

        parent_id.map(|id| id as u64).ok_or_else(|| {
            DirectoryError::invalid_input("token", "Reset token is invalid or has expired")
        })
    }

    /// Records the outcome of the welcome email.
    pub fn set_welcome_status(&mut self, parent_id: u64, status: EmailStatus) -> Result<()> {
        let rows = self
            .connection
            .execute(
                "UPDATE parents SET welcome_email_status = ?1 WHERE id = ?2",
                params![status.as_str(), parent_id as i64],
            )
            .db_context("Failed to update welcome email status")?;
        if rows == 0 {
            return Err(DirectoryError::RecordNotFound {
                kind: "Parent",
                id: parent_id,
            });
        }
        Ok(())
    }

    /// Adds or removes a favorite and returns whether the camp is now a
    /// favorite. Removing always works; adding needs an approved camp.
    pub fn toggle_favorite(&mut self, parent_id: u64, camp_id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_parent_exists(&tx, parent_id)?;

        let removed = tx
            .execute(
                "DELETE FROM parent_favorites WHERE parent_id = ?1 AND camp_id = ?2",
                params![parent_id as i64, camp_id as i64],
            )
            .db_context("Failed to remove favorite")?;

        let favorited = if removed > 0 {
            false
        } else {
            let approved: bool = tx
                .query_row(
                    "SELECT approved FROM camps WHERE id = ?1",
                    params![camp_id as i64],
                    |row| row.get(0),
                )
                .optional()
                .db_context("Failed to query camp")?
                .ok_or(DirectoryError::CampNotFound { id: camp_id })?;
            if !approved {
                return Err(DirectoryError::invalid_input(
                    "camp_id",
                    "Only approved camps can be saved as favorites",
                ));
            }
            tx.execute(
                "INSERT INTO parent_favorites (parent_id, camp_id, created_at) VALUES (?1, ?2, ?3)",
                params![parent_id as i64, camp_id as i64, Timestamp::now().to_string()],
            )
            .db_context("Failed to add favorite")?;
            true
        };

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Parent {parent_id} favorite {camp_id}: {favorited}");
        Ok(favorited)
    }

    /// A parent's favorite camps that are still publicly listed, most
    /// recently saved first.
    pub fn list_favorites(&self, parent_id: u64) -> Result<Vec<CampSummary>> {
        ensure_parent_exists(&self.connection, parent_id)?;
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM camps c \
             JOIN parent_favorites f ON f.camp_id = c.id \
             WHERE f.parent_id = ?1 AND c.approved = 1 \
             ORDER BY f.created_at DESC, c.id"
        );
        query_summaries(&self.connection, &sql, &[&(parent_id as i64)])
    }

    /// Validates and stores a parent's message to a camp.
    pub fn create_message(&mut self, mut message: NewMessage) -> Result<Message> {
        message.validate()?;

        ensure_parent_exists(&self.connection, message.parent_id)?;
        ensure_camp_exists(&self.connection, message.camp_id)?;

        let now = Timestamp::now();
        self.connection
            .execute(
                "INSERT INTO messages (parent_id, camp_id, subject, body, is_read, created_at) VALUES (?1, ?2, ?3, ?4, 0, ?5)",
                params![
                    message.parent_id as i64,
                    message.camp_id as i64,
                    message.subject,
                    message.body,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert message")?;

        Ok(Message {
            id: self.connection.last_insert_rowid() as u64,
            parent_id: message.parent_id,
            camp_id: message.camp_id,
            subject: message.subject,
            body: message.body,
            read: false,
            created_at: now,
        })
    }

    pub fn get_message(&self, id: u64) -> Result<Option<Message>> {
        self.connection
            .query_row(
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?1"),
                params![id as i64],
                build_message_from_row,
            )
            .optional()
            .db_context("Failed to query message")
    }

    /// Messages sent to a camp, newest first.
    pub fn list_messages(&self, camp_id: u64) -> Result<Vec<Message>> {
        ensure_camp_exists(&self.connection, camp_id)?;
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages WHERE camp_id = ?1 ORDER BY created_at DESC, id DESC"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![camp_id as i64], build_message_from_row)
            .db_context("Failed to query messages")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch messages");
        rows
    }

    pub fn mark_message_read(&mut self, id: u64) -> Result<()> {
        let rows = self
            .connection
            .execute("UPDATE messages SET is_read = 1 WHERE id = ?1", params![id as i64])
            .db_context("Failed to mark message read")?;
        if rows == 0 {
            return Err(DirectoryError::RecordNotFound { kind: "Message", id });
        }
        Ok(())
    }

    /// Validates and stores a contact form submission.
    pub fn create_contact(&mut self, mut form: ContactForm) -> Result<ContactSubmission> {
        form.validate()?;

        let subject = form
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let now = Timestamp::now();
        self.connection
            .execute(
                "INSERT INTO contact_submissions (name, email, subject, message, email_status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    form.name,
                    form.email,
                    subject,
                    form.message,
                    EmailStatus::Pending.as_str(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert contact submission")?;

        Ok(ContactSubmission {
            id: self.connection.last_insert_rowid() as u64,
            name: form.name,
            email: form.email,
            subject,
            message: form.message,
            email_status: EmailStatus::Pending,
            created_at: now,
        })
    }

    pub fn get_contact(&self, id: u64) -> Result<Option<ContactSubmission>> {
        self.connection
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contact_submissions WHERE id = ?1"),
                params![id as i64],
                build_contact_from_row,
            )
            .optional()
            .db_context("Failed to query contact submission")
    }

    /// Records whether the acknowledgment and admin notice went out.
    pub fn set_contact_status(&mut self, id: u64, status: EmailStatus) -> Result<()> {
        let rows = self
            .connection
            .execute(
                "UPDATE contact_submissions SET email_status = ?1 WHERE id = ?2",
                params![status.as_str(), id as i64],
            )
            .db_context("Failed to update contact email status")?;
        if rows == 0 {
            return Err(DirectoryError::RecordNotFound {
                kind: "Contact submission",
                id,
            });
        }
        Ok(())
    }
}
