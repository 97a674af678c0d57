//! Builder for creating and configuring [`SqliteBackend`] instances.

use std::path::{Path, PathBuf};

use log::info;
use tokio::task;

use super::SqliteBackend;
use crate::{
    db::Database,
    error::{BackendError, Result},
};

/// Builder for creating and configuring a SQLite backend.
#[derive(Debug, Clone, Default)]
pub struct BackendBuilder {
    database_path: Option<PathBuf>,
}

impl BackendBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Creates the database file and schema if needed and returns the
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::FileSystem` if the parent directory cannot be
    /// created, `BackendError::XdgDirectory` if no default location exists,
    /// and `BackendError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<SqliteBackend> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BackendError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(|_| ()))
            .await
            .map_err(BackendError::task)??;

        info!("Using trip database at {}", db_path.display());
        Ok(SqliteBackend::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| BackendError::XdgDirectory(e.to_string()))
    }
}
