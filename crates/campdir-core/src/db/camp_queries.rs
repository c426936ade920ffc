//! Camp CRUD, approval and taxonomy link management.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    taxonomy_queries::ensure_terms_exist,
    utils::{date_to_sql, get_id, get_optional_date, get_timestamp},
};
use crate::{
    error::{DatabaseResultExt, DirectoryError, Result},
    models::{Camp, NewCamp, Taxonomy, Term},
};

const CAMP_COLUMNS: &str = "id, name, approved, featured, city, state, zip, address, description, activities_text, director_name, email, phone, website, opening_day, closing_day, min_price, max_price, logo_url, internal_link, rating, created_at, updated_at";
const INSERT_CAMP_SQL: &str = "INSERT INTO camps (name, approved, featured, city, state, zip, address, description, activities_text, director_name, email, phone, website, opening_day, closing_day, min_price, max_price, logo_url, internal_link, rating, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)";
const UPDATE_CAMP_SQL: &str = "UPDATE camps SET name = ?1, approved = ?2, featured = ?3, city = ?4, state = ?5, zip = ?6, address = ?7, description = ?8, activities_text = ?9, director_name = ?10, email = ?11, phone = ?12, website = ?13, opening_day = ?14, closing_day = ?15, min_price = ?16, max_price = ?17, logo_url = ?18, internal_link = ?19, rating = ?20, updated_at = ?21 WHERE id = ?22";
const CHECK_CAMP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM camps WHERE id = ?1)";
const UPDATE_APPROVAL_SQL: &str = "UPDATE camps SET approved = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_FEATURED_SQL: &str = "UPDATE camps SET featured = ?1, updated_at = ?2 WHERE id = ?3";
const SELECT_APPROVAL_SQL: &str = "SELECT approved FROM camps WHERE id = ?1";
const DELETE_CAMP_CHILDREN_SQL: [&str; 6] = [
    "DELETE FROM parent_favorites WHERE camp_id = ?1",
    "DELETE FROM credentials WHERE camp_id = ?1",
    "DELETE FROM messages WHERE camp_id = ?1",
    "DELETE FROM accommodations WHERE camp_id = ?1",
    "DELETE FROM faqs WHERE camp_id = ?1",
    "DELETE FROM sessions WHERE camp_id = ?1",
];
const DELETE_CAMP_SQL: &str = "DELETE FROM camps WHERE id = ?1";

/// Builds a camp from a row selected with `CAMP_COLUMNS`; term lists are
/// left empty.
fn build_camp_from_row(row: &Row) -> rusqlite::Result<Camp> {
    Ok(Camp {
        id: get_id(row, 0)?,
        name: row.get(1)?,
        approved: row.get(2)?,
        featured: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        zip: row.get(6)?,
        address: row.get(7)?,
        description: row.get(8)?,
        activities_text: row.get(9)?,
        director_name: row.get(10)?,
        email: row.get(11)?,
        phone: row.get(12)?,
        website: row.get(13)?,
        opening_day: get_optional_date(row, 14)?,
        closing_day: get_optional_date(row, 15)?,
        min_price: row.get(16)?,
        max_price: row.get(17)?,
        logo_url: row.get(18)?,
        internal_link: row.get(19)?,
        rating: row.get(20)?,
        created_at: get_timestamp(row, 21)?,
        updated_at: get_timestamp(row, 22)?,
        types: Vec::new(),
        weeks: Vec::new(),
        activities: Vec::new(),
    })
}

pub(crate) fn camp_exists(conn: &Connection, id: u64) -> Result<bool> {
    conn.query_row(CHECK_CAMP_EXISTS_SQL, params![id as i64], |row| row.get(0))
        .db_context("Failed to check camp existence")
}

pub(crate) fn ensure_camp_exists(conn: &Connection, id: u64) -> Result<()> {
    if camp_exists(conn, id)? {
        Ok(())
    } else {
        Err(DirectoryError::CampNotFound { id })
    }
}

/// Terms of one axis linked to a camp, in curated order. Duplicate pivot
/// rows collapse to one term.
pub(crate) fn terms_for_camp(conn: &Connection, axis: Taxonomy, camp_id: u64) -> Result<Vec<Term>> {
    let sql = format!(
        "SELECT DISTINCT t.id, t.name, t.slug, t.active, t.sort_order \
         FROM {} t JOIN {} l ON l.term_id = t.id \
         WHERE l.camp_id = ?1 ORDER BY t.sort_order, t.name COLLATE NOCASE, t.id",
        axis.table(),
        axis.link_table()
    );
    let mut stmt = conn.prepare(&sql).db_context("Failed to prepare query")?;
    let rows = stmt
        .query_map(params![camp_id as i64], |row| {
            Ok(Term {
                id: get_id(row, 0)?,
                taxonomy: axis,
                name: row.get(1)?,
                slug: row.get(2)?,
                active: row.get(3)?,
                sort_order: row.get(4)?,
            })
        })
        .db_context("Failed to query camp terms")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch camp terms");
    rows
}

/// Replaces every link of one axis for a camp with the given selection.
///
/// Runs on the caller's transaction: delete all, verify the selection,
/// insert. Duplicate ids in the selection are written once.
fn replace_links(conn: &Connection, camp_id: u64, axis: Taxonomy, term_ids: &[u64]) -> Result<()> {
    let mut selection: Vec<u64> = Vec::with_capacity(term_ids.len());
    for &id in term_ids {
        if !selection.contains(&id) {
            selection.push(id);
        }
    }

    conn.execute(
        &format!("DELETE FROM {} WHERE camp_id = ?1", axis.link_table()),
        params![camp_id as i64],
    )
    .db_context("Failed to delete camp links")?;

    ensure_terms_exist(conn, axis, &selection)?;

    let mut stmt = conn
        .prepare(&format!(
            "INSERT INTO {} (camp_id, term_id) VALUES (?1, ?2)",
            axis.link_table()
        ))
        .db_context("Failed to prepare link insert")?;
    for id in selection {
        stmt.execute(params![camp_id as i64, id as i64])
            .db_context("Failed to insert camp link")?;
    }
    Ok(())
}

fn load_terms(conn: &Connection, camp: &mut Camp) -> Result<()> {
    camp.types = terms_for_camp(conn, Taxonomy::Type, camp.id)?;
    camp.weeks = terms_for_camp(conn, Taxonomy::Week, camp.id)?;
    camp.activities = terms_for_camp(conn, Taxonomy::Activity, camp.id)?;
    Ok(())
}

impl super::Database {
    /// Validates and inserts a camp with its taxonomy links.
    pub fn create_camp(&mut self, mut camp: NewCamp) -> Result<Camp> {
        camp.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_CAMP_SQL,
            params![
                camp.name,
                camp.approved,
                camp.featured,
                camp.city,
                camp.state,
                camp.zip,
                camp.address,
                camp.description,
                camp.activities_text,
                camp.director_name,
                camp.email,
                camp.phone,
                camp.website,
                date_to_sql(camp.opening_day),
                date_to_sql(camp.closing_day),
                camp.min_price,
                camp.max_price,
                camp.logo_url,
                camp.internal_link,
                camp.rating,
                &now,
                &now
            ],
        )
        .db_context("Failed to insert camp")?;

        let id = tx.last_insert_rowid() as u64;

        replace_links(&tx, id, Taxonomy::Type, &camp.terms.types)?;
        replace_links(&tx, id, Taxonomy::Week, &camp.terms.weeks)?;
        replace_links(&tx, id, Taxonomy::Activity, &camp.terms.activities)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Created camp {id} ({})", camp.name);
        self.get_camp(id)?
            .ok_or(DirectoryError::CampNotFound { id })
    }

    /// Replaces a camp's profile and all three link sets in one transaction.
    pub fn update_camp(&mut self, id: u64, mut camp: NewCamp) -> Result<Camp> {
        camp.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_camp_exists(&tx, id)?;

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_CAMP_SQL,
            params![
                camp.name,
                camp.approved,
                camp.featured,
                camp.city,
                camp.state,
                camp.zip,
                camp.address,
                camp.description,
                camp.activities_text,
                camp.director_name,
                camp.email,
                camp.phone,
                camp.website,
                date_to_sql(camp.opening_day),
                date_to_sql(camp.closing_day),
                camp.min_price,
                camp.max_price,
                camp.logo_url,
                camp.internal_link,
                camp.rating,
                &now,
                id as i64
            ],
        )
        .db_context("Failed to update camp")?;

        replace_links(&tx, id, Taxonomy::Type, &camp.terms.types)?;
        replace_links(&tx, id, Taxonomy::Week, &camp.terms.weeks)?;
        replace_links(&tx, id, Taxonomy::Activity, &camp.terms.activities)?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Updated camp {id}");
        self.get_camp(id)?
            .ok_or(DirectoryError::CampNotFound { id })
    }

    /// Makes one axis' link set exactly equal to `term_ids`.
    pub fn set_camp_terms(
        &mut self,
        camp_id: u64,
        axis: Taxonomy,
        term_ids: &[u64],
    ) -> Result<Vec<Term>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_camp_exists(&tx, camp_id)?;
        replace_links(&tx, camp_id, axis, term_ids)?;
        tx.execute(
            "UPDATE camps SET updated_at = ?1 WHERE id = ?2",
            params![Timestamp::now().to_string(), camp_id as i64],
        )
        .db_context("Failed to update camp timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        terms_for_camp(&self.connection, axis, camp_id)
    }

    /// Retrieves a camp with all linked terms.
    pub fn get_camp(&self, id: u64) -> Result<Option<Camp>> {
        let mut camp = self
            .connection
            .query_row(
                &format!("SELECT {CAMP_COLUMNS} FROM camps WHERE id = ?1"),
                params![id as i64],
                build_camp_from_row,
            )
            .optional()
            .db_context("Failed to query camp")?;

        if let Some(ref mut camp) = camp {
            load_terms(&self.connection, camp)?;
        }
        Ok(camp)
    }

    /// Permanently deletes a camp, its links and every record hanging off
    /// it. Returns the deleted camp.
    pub fn delete_camp(&mut self, id: u64) -> Result<Camp> {
        let camp = self
            .get_camp(id)?
            .ok_or(DirectoryError::CampNotFound { id })?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for axis in Taxonomy::ALL {
            tx.execute(
                &format!("DELETE FROM {} WHERE camp_id = ?1", axis.link_table()),
                params![id as i64],
            )
            .db_context("Failed to delete camp links")?;
        }
        for sql in DELETE_CAMP_CHILDREN_SQL {
            tx.execute(sql, params![id as i64])
                .db_context("Failed to delete camp records")?;
        }
        tx.execute(DELETE_CAMP_SQL, params![id as i64])
            .db_context("Failed to delete camp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Deleted camp {id} ({})", camp.name);
        Ok(camp)
    }

    /// Sets the public visibility flag.
    pub fn set_approval(&mut self, id: u64, approved: bool) -> Result<()> {
        let rows = self
            .connection
            .execute(
                UPDATE_APPROVAL_SQL,
                params![approved, Timestamp::now().to_string(), id as i64],
            )
            .db_context("Failed to update approval")?;
        if rows == 0 {
            return Err(DirectoryError::CampNotFound { id });
        }
        Ok(())
    }

    /// Flips the approval flag and returns its new value.
    pub fn toggle_approval(&mut self, id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current: bool = tx
            .query_row(SELECT_APPROVAL_SQL, params![id as i64], |row| row.get(0))
            .optional()
            .db_context("Failed to query approval")?
            .ok_or(DirectoryError::CampNotFound { id })?;

        tx.execute(
            UPDATE_APPROVAL_SQL,
            params![!current, Timestamp::now().to_string(), id as i64],
        )
        .db_context("Failed to update approval")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(!current)
    }

    /// Sets the featured flag used by the carousel.
    pub fn set_featured(&mut self, id: u64, featured: bool) -> Result<()> {
        let rows = self
            .connection
            .execute(
                UPDATE_FEATURED_SQL,
                params![featured, Timestamp::now().to_string(), id as i64],
            )
            .db_context("Failed to update featured flag")?;
        if rows == 0 {
            return Err(DirectoryError::CampNotFound { id });
        }
        Ok(())
    }
}
