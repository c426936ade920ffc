//! Builder for creating and configuring Directory instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::Directory;
use crate::{
    db::Database,
    error::{DirectoryError, Result},
    notify::{Mailer, SmtpMailer},
};

/// Builder for creating and configuring Directory instances.
#[derive(Clone)]
pub struct DirectoryBuilder {
    database_path: Option<PathBuf>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl DirectoryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            mailer: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, the database lives in the XDG data directory:
    /// `$XDG_DATA_HOME/campdir/campdir.db` or `~/.local/share/campdir/campdir.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the delivery backend. Defaults to [`SmtpMailer::from_env`].
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Builds the configured directory, creating the database file and
    /// schema when needed.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::FileSystem` if the database directory cannot
    /// be created, `DirectoryError::XdgDirectory` if no default location is
    /// available, and `DirectoryError::Database` if schema setup fails.
    pub async fn build(self) -> Result<Directory> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DirectoryError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), DirectoryError>(())
        })
        .await
        .map_err(|e| DirectoryError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let mailer = self
            .mailer
            .unwrap_or_else(|| Arc::new(SmtpMailer::from_env()));
        Ok(Directory::new(db_path, mailer))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("campdir")
            .place_data_file("campdir.db")
            .map_err(|e| DirectoryError::XdgDirectory(e.to_string()))
    }
}

impl Default for DirectoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
