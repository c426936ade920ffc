//! Database operations and SQLite management for the camp directory.
//!
//! This module provides the low-level, synchronous store. It owns the SQLite
//! connection, applies the embedded schema, and exposes one query module per
//! concern. Every operation that issues more than one write statement runs
//! inside a single transaction.

use std::path::Path;

use log::warn;
use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod camp_queries;
pub mod credential_queries;
pub mod detail_queries;
pub mod listing_queries;
pub mod migrations;
pub mod notification_queries;
pub mod parent_queries;
pub mod settings_queries;
pub mod taxonomy_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Runs `work` inside one immediate transaction. Nothing `work` wrote
    /// survives an error.
    ///
    /// Methods that open their own transaction must not be called from
    /// `work`; SQLite does not nest `BEGIN`.
    pub fn atomically<T, F>(&mut self, work: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.connection
            .execute_batch("BEGIN IMMEDIATE")
            .db_context("Failed to begin transaction")?;

        let outcome = work(self).and_then(|value| {
            self.connection
                .execute_batch("COMMIT")
                .db_context("Failed to commit transaction")?;
            Ok(value)
        });

        if outcome.is_err() && !self.connection.is_autocommit() {
            if let Err(e) = self.connection.execute_batch("ROLLBACK") {
                warn!("Failed to roll back transaction: {e}");
            }
        }
        outcome
    }
}
