//! Taxonomy term CRUD and ordering.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::utils::get_id;
use crate::{
    error::{DatabaseResultExt, DirectoryError, Result},
    models::{slugify, Taxonomy, Term},
};

fn term_columns() -> &'static str {
    "id, name, slug, active, sort_order"
}

fn build_term_from_row(axis: Taxonomy, row: &Row) -> rusqlite::Result<Term> {
    Ok(Term {
        id: get_id(row, 0)?,
        taxonomy: axis,
        name: row.get(1)?,
        slug: row.get(2)?,
        active: row.get(3)?,
        sort_order: row.get(4)?,
    })
}

fn term_not_found(axis: Taxonomy, id: u64) -> DirectoryError {
    DirectoryError::TermNotFound {
        taxonomy: axis.label().to_string(),
        id,
    }
}

/// Fetches a term on any connection or transaction.
pub(crate) fn find_term(conn: &Connection, axis: Taxonomy, id: u64) -> Result<Option<Term>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", term_columns(), axis.table());
    conn.query_row(&sql, params![id as i64], |row| build_term_from_row(axis, row))
        .optional()
        .db_context("Failed to query term")
}

/// Fails with `TermNotFound` unless every id exists in the axis.
pub(crate) fn ensure_terms_exist(conn: &Connection, axis: Taxonomy, ids: &[u64]) -> Result<()> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", axis.table());
    let mut stmt = conn.prepare(&sql).db_context("Failed to prepare term check")?;
    for &id in ids {
        let exists: bool = stmt
            .query_row(params![id as i64], |row| row.get(0))
            .db_context("Failed to check term existence")?;
        if !exists {
            return Err(term_not_found(axis, id));
        }
    }
    Ok(())
}

/// Normalizes a requested slug (or derives one from the name) and checks it
/// is free within the axis, ignoring the term being edited.
fn resolve_slug(
    conn: &Connection,
    axis: Taxonomy,
    name: &str,
    requested: Option<&str>,
    exclude_id: Option<u64>,
) -> Result<String> {
    let slug = slugify(requested.unwrap_or(name));
    if slug.is_empty() {
        return Err(DirectoryError::invalid_input(
            "slug",
            "Slug must contain at least one letter or digit",
        ));
    }

    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = ?1 AND id != ?2)",
        axis.table()
    );
    let taken: bool = conn
        .query_row(&sql, params![slug, exclude_id.map_or(-1, |id| id as i64)], |row| {
            row.get(0)
        })
        .db_context("Failed to check slug uniqueness")?;

    if taken {
        return Err(DirectoryError::invalid_input(
            "slug",
            format!("Slug '{slug}' is already used by another {} term", axis.as_str()),
        ));
    }
    Ok(slug)
}

impl super::Database {
    /// Creates a term at the end of the axis' curated order.
    pub fn create_term(
        &mut self,
        axis: Taxonomy,
        name: &str,
        slug: Option<&str>,
        active: bool,
    ) -> Result<Term> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DirectoryError::invalid_input("name", "Term name is required"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let slug = resolve_slug(&tx, axis, name, slug, None)?;

        let next_order: i64 = tx
            .query_row(
                &format!("SELECT COALESCE(MAX(sort_order), -1) + 1 FROM {}", axis.table()),
                [],
                |row| row.get(0),
            )
            .db_context("Failed to get next sort order")?;

        tx.execute(
            &format!(
                "INSERT INTO {} (name, slug, active, sort_order) VALUES (?1, ?2, ?3, ?4)",
                axis.table()
            ),
            params![name, slug, active, next_order],
        )
        .db_context("Failed to insert term")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Created {} term {id} ({slug})", axis.as_str());

        Ok(Term {
            id,
            taxonomy: axis,
            name: name.to_string(),
            slug,
            active,
            sort_order: next_order,
        })
    }

    /// Retrieves a term by its ID.
    pub fn get_term(&self, axis: Taxonomy, id: u64) -> Result<Option<Term>> {
        find_term(&self.connection, axis, id)
    }

    /// Changes any of name, slug and active flag. Renaming without an
    /// explicit slug keeps the current slug.
    pub fn update_term(
        &mut self,
        axis: Taxonomy,
        id: u64,
        name: Option<&str>,
        slug: Option<&str>,
        active: Option<bool>,
    ) -> Result<Term> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut term = find_term(&tx, axis, id)?.ok_or_else(|| term_not_found(axis, id))?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DirectoryError::invalid_input("name", "Term name is required"));
            }
            term.name = name.to_string();
        }
        if let Some(slug) = slug {
            term.slug = resolve_slug(&tx, axis, &term.name, Some(slug), Some(id))?;
        }
        if let Some(active) = active {
            term.active = active;
        }

        tx.execute(
            &format!(
                "UPDATE {} SET name = ?1, slug = ?2, active = ?3 WHERE id = ?4",
                axis.table()
            ),
            params![term.name, term.slug, term.active, id as i64],
        )
        .db_context("Failed to update term")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(term)
    }

    /// Deletes a term together with every camp link to it. Returns the
    /// deleted term.
    pub fn delete_term(&mut self, axis: Taxonomy, id: u64) -> Result<Term> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let term = find_term(&tx, axis, id)?.ok_or_else(|| term_not_found(axis, id))?;

        tx.execute(
            &format!("DELETE FROM {} WHERE term_id = ?1", axis.link_table()),
            params![id as i64],
        )
        .db_context("Failed to delete term links")?;

        tx.execute(
            &format!("DELETE FROM {} WHERE id = ?1", axis.table()),
            params![id as i64],
        )
        .db_context("Failed to delete term")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(term)
    }

    /// Lists the terms of an axis in curated order.
    pub fn list_terms(&self, axis: Taxonomy, active_only: bool) -> Result<Vec<Term>> {
        let filter = if active_only { " WHERE active = 1" } else { "" };
        let sql = format!(
            "SELECT {} FROM {}{filter} ORDER BY sort_order, name COLLATE NOCASE, id",
            term_columns(),
            axis.table()
        );

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| build_term_from_row(axis, row))
            .db_context("Failed to query terms")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch terms");
        rows
    }

    /// Persists a drag-and-drop order: each listed id gets its position as
    /// its rank. Terms left out keep their current rank. Any unknown id
    /// aborts the whole reorder.
    pub fn reorder_terms(&mut self, axis: Taxonomy, ordered_ids: &[u64]) -> Result<Vec<Term>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_terms_exist(&tx, axis, ordered_ids)?;

        {
            let mut stmt = tx
                .prepare(&format!(
                    "UPDATE {} SET sort_order = ?1 WHERE id = ?2",
                    axis.table()
                ))
                .db_context("Failed to prepare reorder")?;
            for (position, &id) in ordered_ids.iter().enumerate() {
                stmt.execute(params![position as i64, id as i64])
                    .db_context("Failed to update sort order")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Reordered {} {} terms", ordered_ids.len(), axis.as_str());
        self.list_terms(axis, false)
    }
}
