//! Stored logins. Listing never reads the secret column.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::{
    camp_queries::ensure_camp_exists,
    utils::{get_id, get_timestamp},
};
use crate::{
    error::{DatabaseResultExt, DirectoryError, Result},
    models::{Credential, CredentialInput},
};

const CREDENTIAL_COLUMNS: &str = "id, camp_id, label, username, notes, created_at, updated_at";

fn build_credential_from_row(row: &Row) -> rusqlite::Result<Credential> {
    Ok(Credential {
        id: get_id(row, 0)?,
        camp_id: row.get::<_, Option<i64>>(1)?.map(|id| id as u64),
        label: row.get(2)?,
        username: row.get(3)?,
        notes: row.get(4)?,
        created_at: get_timestamp(row, 5)?,
        updated_at: get_timestamp(row, 6)?,
    })
}

fn not_found(id: u64) -> DirectoryError {
    DirectoryError::RecordNotFound {
        kind: "Credential",
        id,
    }
}

impl super::Database {
    /// Inserts or updates a credential and returns it without its secret.
    pub fn save_credential(&mut self, mut input: CredentialInput) -> Result<Credential> {
        input.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        if let Some(camp_id) = input.camp_id {
            ensure_camp_exists(&tx, camp_id)?;
        }

        let now = Timestamp::now().to_string();
        let id = match input.id {
            Some(id) => {
                let rows = tx
                    .execute(
                        "UPDATE credentials SET camp_id = ?1, label = ?2, username = ?3, secret = ?4, notes = ?5, updated_at = ?6 WHERE id = ?7",
                        params![
                            input.camp_id.map(|c| c as i64),
                            input.label,
                            input.username,
                            input.secret,
                            input.notes,
                            now,
                            id as i64
                        ],
                    )
                    .db_context("Failed to update credential")?;
                if rows == 0 {
                    return Err(not_found(id));
                }
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO credentials (camp_id, label, username, secret, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                    params![
                        input.camp_id.map(|c| c as i64),
                        input.label,
                        input.username,
                        input.secret,
                        input.notes,
                        now
                    ],
                )
                .db_context("Failed to insert credential")?;
                tx.last_insert_rowid() as u64
            }
        };

        let credential = tx
            .query_row(
                &format!("SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE id = ?1"),
                params![id as i64],
                build_credential_from_row,
            )
            .db_context("Failed to read back credential")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(credential)
    }

    /// Credentials ordered by label, optionally limited to one camp.
    pub fn list_credentials(&self, camp_id: Option<u64>) -> Result<Vec<Credential>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {CREDENTIAL_COLUMNS} FROM credentials \
                 WHERE ?1 IS NULL OR camp_id = ?1 \
                 ORDER BY label COLLATE NOCASE, id"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(
                params![camp_id.map(|c| c as i64)],
                build_credential_from_row,
            )
            .db_context("Failed to query credentials")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch credentials");
        rows
    }

    pub fn get_credential(&self, id: u64) -> Result<Option<Credential>> {
        self.connection
            .query_row(
                &format!("SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE id = ?1"),
                params![id as i64],
                build_credential_from_row,
            )
            .optional()
            .db_context("Failed to query credential")
    }

    /// Reads one credential's secret.
    pub fn reveal_credential(&self, id: u64) -> Result<String> {
        self.connection
            .query_row(
                "SELECT secret FROM credentials WHERE id = ?1",
                params![id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query credential secret")?
            .ok_or_else(|| not_found(id))
    }

    pub fn delete_credential(&mut self, id: u64) -> Result<Credential> {
        let credential = self.get_credential(id)?.ok_or_else(|| not_found(id))?;
        self.connection
            .execute("DELETE FROM credentials WHERE id = ?1", params![id as i64])
            .db_context("Failed to delete credential")?;
        Ok(credential)
    }
}
