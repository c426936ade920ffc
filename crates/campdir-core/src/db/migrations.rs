//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Pivot and child tables rely on cascading foreign keys
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Adds columns introduced after the first schema release.
    fn apply_migrations(&self) -> Result<()> {
        if !self.has_column("camps", "rating")? {
            info!("Adding rating column to camps table");
            self.connection
                .execute("ALTER TABLE camps ADD COLUMN rating REAL", [])
                .db_context("Failed to add rating column to camps table")?;
        }

        if !self.has_column("notification_queue", "claimed_at")? {
            info!("Adding claimed_at column to notification_queue table");
            self.connection
                .execute(
                    "ALTER TABLE notification_queue ADD COLUMN claimed_at INTEGER",
                    [],
                )
                .db_context("Failed to add claimed_at column to notification_queue table")?;
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
