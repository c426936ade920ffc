//! High-level, asynchronous directory API.
//!
//! [`Directory`] is the entry point used by the CLI and the MCP server. It
//! checks what the calling [`Actor`](crate::models::Actor) may do, then runs
//! the synchronous [`Database`] work on tokio's blocking pool with a fresh
//! connection per call, so concurrent requests never share a connection.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Interfaces    │    │    Directory    │    │    Database     │
//! │  (CLI, MCP)     │───▶│ (capabilities,  │───▶│   (via db/)     │
//! │                 │    │  mail, async)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: [`DirectoryBuilder`] for database path and mailer setup
//! - [`camp_ops`]: camp records, approval and the public listing
//! - [`taxonomy_ops`]: term management
//! - [`detail_ops`]: accommodations, FAQs and sessions
//! - [`parent_ops`]: parents, favorites, messages and the contact form
//! - [`notify_ops`]: digest runs, queue status and settings
//!
//! # Example
//!
//! ```rust
//! use campdir_core::{models::{Actor, CampQuery, NewCamp}, DirectoryBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = DirectoryBuilder::new()
//!     .with_database_path(Some("campdir.db"))
//!     .build()
//!     .await?;
//!
//! let camp = directory
//!     .create_camp(Actor::Admin, NewCamp::named("Camp Birchwood"))
//!     .await?;
//! directory.set_approval(Actor::Admin, camp.id, true).await?;
//!
//! let listing = directory.search_camps(CampQuery::new()).await?;
//! println!("{listing}");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    db::Database,
    error::{DirectoryError, Result},
    notify::Mailer,
};

pub mod builder;
pub mod camp_ops;
pub mod credential_ops;
pub mod detail_ops;
pub mod notify_ops;
pub mod parent_ops;
pub mod taxonomy_ops;


pub use builder::DirectoryBuilder;

/// Main directory interface.
pub struct Directory {
    pub(crate) db_path: PathBuf,
    pub(crate) mailer: Arc<dyn Mailer>,
}

impl Directory {
    pub(crate) fn new(db_path: PathBuf, mailer: Arc<dyn Mailer>) -> Self {
        Self { db_path, mailer }
    }

    /// Path of the SQLite database this directory works on.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `work` on the blocking pool against a newly opened database.
    pub(crate) async fn with_database<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            work(&mut db)
        })
        .await
        .map_err(|e| DirectoryError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
