//! Accommodation, FAQ and session records attached to a camp.

use rusqlite::{params, Connection, Row};

use super::{
    camp_queries::ensure_camp_exists,
    utils::{date_to_sql, get_id, get_optional_date},
};
use crate::{
    error::{DatabaseResultExt, DirectoryError, Result},
    models::{Accommodation, AccommodationInput, Faq, FaqInput, Session, SessionInput},
};

/// Fails with `RecordNotFound` unless row `id` of `table` belongs to the camp.
fn ensure_owned(
    conn: &Connection,
    table: &str,
    kind: &'static str,
    camp_id: u64,
    id: u64,
) -> Result<()> {
    let owned: bool = conn
        .query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1 AND camp_id = ?2)"),
            params![id as i64, camp_id as i64],
            |row| row.get(0),
        )
        .db_context("Failed to check record ownership")?;

    if owned {
        Ok(())
    } else {
        Err(DirectoryError::RecordNotFound { kind, id })
    }
}

fn delete_owned(
    conn: &Connection,
    table: &str,
    kind: &'static str,
    camp_id: u64,
    id: u64,
) -> Result<()> {
    ensure_owned(conn, table, kind, camp_id, id)?;
    conn.execute(
        &format!("DELETE FROM {table} WHERE id = ?1"),
        params![id as i64],
    )
    .db_context("Failed to delete record")?;
    Ok(())
}

fn build_accommodation_from_row(row: &Row) -> rusqlite::Result<Accommodation> {
    Ok(Accommodation {
        id: get_id(row, 0)?,
        camp_id: get_id(row, 1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        capacity: row.get(4)?,
    })
}

fn build_faq_from_row(row: &Row) -> rusqlite::Result<Faq> {
    Ok(Faq {
        id: get_id(row, 0)?,
        camp_id: get_id(row, 1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        sort_order: row.get(4)?,
    })
}

fn build_session_from_row(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: get_id(row, 0)?,
        camp_id: get_id(row, 1)?,
        name: row.get(2)?,
        start_date: get_optional_date(row, 3)?,
        end_date: get_optional_date(row, 4)?,
        price: row.get(5)?,
        notes: row.get(6)?,
    })
}

impl super::Database {
    /// Inserts or updates an accommodation.
    pub fn save_accommodation(&mut self, mut input: AccommodationInput) -> Result<Accommodation> {
        input.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        ensure_camp_exists(&tx, input.camp_id)?;

        let id = match input.id {
            Some(id) => {
                ensure_owned(&tx, "accommodations", "Accommodation", input.camp_id, id)?;
                tx.execute(
                    "UPDATE accommodations SET name = ?1, description = ?2, capacity = ?3 WHERE id = ?4",
                    params![input.name, input.description, input.capacity, id as i64],
                )
                .db_context("Failed to update accommodation")?;
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO accommodations (camp_id, name, description, capacity) VALUES (?1, ?2, ?3, ?4)",
                    params![input.camp_id as i64, input.name, input.description, input.capacity],
                )
                .db_context("Failed to insert accommodation")?;
                tx.last_insert_rowid() as u64
            }
        };

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Accommodation {
            id,
            camp_id: input.camp_id,
            name: input.name,
            description: input.description,
            capacity: input.capacity,
        })
    }

    pub fn delete_accommodation(&mut self, camp_id: u64, id: u64) -> Result<()> {
        delete_owned(&self.connection, "accommodations", "Accommodation", camp_id, id)
    }

    pub fn list_accommodations(&self, camp_id: u64) -> Result<Vec<Accommodation>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT id, camp_id, name, description, capacity FROM accommodations \
                 WHERE camp_id = ?1 ORDER BY name COLLATE NOCASE, id",
            )
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![camp_id as i64], build_accommodation_from_row)
            .db_context("Failed to query accommodations")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch accommodations");
        rows
    }

    /// Inserts or updates a FAQ entry.
    pub fn save_faq(&mut self, mut input: FaqInput) -> Result<Faq> {
        input.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        ensure_camp_exists(&tx, input.camp_id)?;

        let (id, sort_order) = match input.id {
            Some(id) => {
                ensure_owned(&tx, "faqs", "FAQ", input.camp_id, id)?;
                let current: i64 = tx
                    .query_row(
                        "SELECT sort_order FROM faqs WHERE id = ?1",
                        params![id as i64],
                        |row| row.get(0),
                    )
                    .db_context("Failed to read FAQ order")?;
                let sort_order = input.sort_order.unwrap_or(current);
                tx.execute(
                    "UPDATE faqs SET question = ?1, answer = ?2, sort_order = ?3 WHERE id = ?4",
                    params![input.question, input.answer, sort_order, id as i64],
                )
                .db_context("Failed to update FAQ")?;
                (id, sort_order)
            }
            None => {
                let sort_order = match input.sort_order {
                    Some(order) => order,
                    None => tx
                        .query_row(
                            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM faqs WHERE camp_id = ?1",
                            params![input.camp_id as i64],
                            |row| row.get(0),
                        )
                        .db_context("Failed to get next FAQ order")?,
                };
                tx.execute(
                    "INSERT INTO faqs (camp_id, question, answer, sort_order) VALUES (?1, ?2, ?3, ?4)",
                    params![input.camp_id as i64, input.question, input.answer, sort_order],
                )
                .db_context("Failed to insert FAQ")?;
                (tx.last_insert_rowid() as u64, sort_order)
            }
        };

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Faq {
            id,
            camp_id: input.camp_id,
            question: input.question,
            answer: input.answer,
            sort_order,
        })
    }

    pub fn delete_faq(&mut self, camp_id: u64, id: u64) -> Result<()> {
        delete_owned(&self.connection, "faqs", "FAQ", camp_id, id)
    }

    /// FAQs of a camp in display order.
    pub fn list_faqs(&self, camp_id: u64) -> Result<Vec<Faq>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT id, camp_id, question, answer, sort_order FROM faqs \
                 WHERE camp_id = ?1 ORDER BY sort_order, id",
            )
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![camp_id as i64], build_faq_from_row)
            .db_context("Failed to query FAQs")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch FAQs");
        rows
    }

    /// Inserts or updates a session.
    pub fn save_session(&mut self, mut input: SessionInput) -> Result<Session> {
        input.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        ensure_camp_exists(&tx, input.camp_id)?;

        let start = date_to_sql(input.start_date);
        let end = date_to_sql(input.end_date);

        let id = match input.id {
            Some(id) => {
                ensure_owned(&tx, "sessions", "Session", input.camp_id, id)?;
                tx.execute(
                    "UPDATE sessions SET name = ?1, start_date = ?2, end_date = ?3, price = ?4, notes = ?5 WHERE id = ?6",
                    params![input.name, start, end, input.price, input.notes, id as i64],
                )
                .db_context("Failed to update session")?;
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO sessions (camp_id, name, start_date, end_date, price, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![input.camp_id as i64, input.name, start, end, input.price, input.notes],
                )
                .db_context("Failed to insert session")?;
                tx.last_insert_rowid() as u64
            }
        };

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Session {
            id,
            camp_id: input.camp_id,
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            price: input.price,
            notes: input.notes,
        })
    }

    pub fn delete_session(&mut self, camp_id: u64, id: u64) -> Result<()> {
        delete_owned(&self.connection, "sessions", "Session", camp_id, id)
    }

    /// Sessions of a camp by start date; undated sessions last.
    pub fn list_sessions(&self, camp_id: u64) -> Result<Vec<Session>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT id, camp_id, name, start_date, end_date, price, notes FROM sessions \
                 WHERE camp_id = ?1 ORDER BY start_date IS NULL, start_date, id",
            )
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![camp_id as i64], build_session_from_row)
            .db_context("Failed to query sessions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch sessions");
        rows
    }
}
