//! Trip CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::utils::{date_column, date_param, enum_column, id_column, timestamp_column};
use crate::{
    error::{BackendError, DatabaseResultExt, Entity, Result},
    models::{NewTrip, Trip, UpdateTrip, UserId},
};

const TRIP_COLUMNS: &str = "id, created_at, updated_at, name, start_location, destination, start_date, end_date, status, thumbnail_url, user_id";
const INSERT_TRIP_SQL: &str = "INSERT INTO trips (created_at, updated_at, name, start_location, destination, start_date, end_date, status, thumbnail_url, user_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET updated_at = ?1, name = ?2, start_location = ?3, destination = ?4, start_date = ?5, end_date = ?6, status = ?7, thumbnail_url = ?8, user_id = ?9 WHERE id = ?10";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";
pub(super) const CHECK_TRIP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM trips WHERE id = ?1)";

impl super::Database {
    /// Helper function to construct a Trip from a database row
    fn build_trip_from_row(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
        Ok(Trip {
            id: id_column(row, 0)?,
            created_at: timestamp_column(row, 1)?,
            updated_at: timestamp_column(row, 2)?,
            name: row.get(3)?,
            start_location: row.get(4)?,
            destination: row.get(5)?,
            start_date: date_column(row, 6)?,
            end_date: date_column(row, 7)?,
            status: enum_column(row, 8)?,
            thumbnail_url: row.get(9)?,
            user_id: UserId::new(row.get::<_, String>(10)?),
        })
    }

    fn select_trip(tx: &Transaction<'_>, id: u64) -> Result<Option<Trip>> {
        tx.query_row(
            &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
            params![id as i64],
            Self::build_trip_from_row,
        )
        .optional()
        .db_context("Failed to query trip")
    }

    /// Lists every trip, earliest start date first. Trips without a start
    /// date come last.
    pub fn get_all_trips(&self) -> Result<Vec<Trip>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TRIP_COLUMNS} FROM trips ORDER BY start_date IS NULL, start_date ASC, id ASC"
            ))
            .db_context("Failed to prepare query")?;

        let trips = stmt
            .query_map([], Self::build_trip_from_row)
            .db_context("Failed to query trips")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trips")?;

        Ok(trips)
    }

    /// Retrieves a trip by its ID.
    pub fn get_trip(&self, id: u64) -> Result<Trip> {
        self.connection
            .query_row(
                &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
                params![id as i64],
                Self::build_trip_from_row,
            )
            .optional()
            .db_context("Failed to query trip")?
            .ok_or_else(|| BackendError::not_found(Entity::Trip, id))
    }

    /// Inserts a new trip and returns the stored record.
    pub fn create_trip(&mut self, trip: &NewTrip) -> Result<Trip> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TRIP_SQL,
            params![
                &now_str,
                &now_str,
                trip.name,
                trip.start_location,
                trip.destination,
                date_param(trip.start_date),
                date_param(trip.end_date),
                trip.status.as_str(),
                trip.thumbnail_url,
                trip.user_id.as_str(),
            ],
        )
        .db_context("Failed to insert trip")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Trip {
            id,
            created_at: now,
            updated_at: now,
            name: trip.name.clone(),
            start_location: trip.start_location.clone(),
            destination: trip.destination.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            status: trip.status,
            thumbnail_url: trip.thumbnail_url.clone(),
            user_id: trip.user_id.clone(),
        })
    }

    /// Applies a partial update to a trip and returns the updated record.
    pub fn update_trip(&mut self, id: u64, update: &UpdateTrip) -> Result<Trip> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut trip =
            Self::select_trip(&tx, id)?.ok_or_else(|| BackendError::not_found(Entity::Trip, id))?;

        update.apply_to(&mut trip);
        trip.updated_at = Timestamp::now();

        tx.execute(
            UPDATE_TRIP_SQL,
            params![
                trip.updated_at.to_string(),
                trip.name,
                trip.start_location,
                trip.destination,
                date_param(trip.start_date),
                date_param(trip.end_date),
                trip.status.as_str(),
                trip.thumbnail_url,
                trip.user_id.as_str(),
                id as i64,
            ],
        )
        .db_context("Failed to update trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(trip)
    }

    /// Permanently deletes a trip. Its preferences and participants go with
    /// it through the foreign key cascade.
    pub fn delete_trip(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_TRIP_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check trip existence")?;

        if !exists {
            return Err(BackendError::not_found(Entity::Trip, id));
        }

        tx.execute(DELETE_TRIP_SQL, params![id as i64])
            .db_context("Failed to delete trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
