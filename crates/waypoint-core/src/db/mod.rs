//! SQLite storage for trips, preferences and participants.
//!
//! [`Database`] is the synchronous layer: one connection, one method per
//! table operation. [`crate::backend::SqliteBackend`] wraps it behind the
//! async [`Backend`](crate::backend::Backend) trait.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod participant_queries;
pub mod preference_queries;
pub mod trip_queries;
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
}
