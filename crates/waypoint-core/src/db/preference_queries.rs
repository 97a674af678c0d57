//! Trip preferences CRUD operations, keyed by trip.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{
    trip_queries::CHECK_TRIP_EXISTS_SQL,
    utils::{enum_column, id_column, json_column, timestamp_column, to_json},
};
use crate::{
    error::{BackendError, DatabaseResultExt, Entity, Result},
    models::{NewTripPreferences, TripPreferences, UpdateTripPreferences},
};

const PREFERENCE_COLUMNS: &str = "id, created_at, updated_at, trip_id, stop_preferences, distance_between_stops, accommodation, dining";
const INSERT_PREFERENCES_SQL: &str = "INSERT INTO trip_preferences (created_at, updated_at, trip_id, stop_preferences, distance_between_stops, accommodation, dining) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_PREFERENCES_SQL: &str = "UPDATE trip_preferences SET updated_at = ?1, stop_preferences = ?2, distance_between_stops = ?3, accommodation = ?4, dining = ?5 WHERE trip_id = ?6";
const DELETE_PREFERENCES_SQL: &str = "DELETE FROM trip_preferences WHERE trip_id = ?1";

impl super::Database {
    fn build_preferences_from_row(row: &rusqlite::Row) -> rusqlite::Result<TripPreferences> {
        Ok(TripPreferences {
            id: id_column(row, 0)?,
            created_at: timestamp_column(row, 1)?,
            updated_at: timestamp_column(row, 2)?,
            trip_id: id_column(row, 3)?,
            stop_preferences: json_column(row, 4)?,
            distance_between_stops: row.get::<_, i64>(5)? as u32,
            accommodation: enum_column(row, 6)?,
            dining: enum_column(row, 7)?,
        })
    }

    /// Lists the preferences of every trip.
    pub fn get_all_preferences(&self) -> Result<Vec<TripPreferences>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {PREFERENCE_COLUMNS} FROM trip_preferences ORDER BY trip_id"
            ))
            .db_context("Failed to prepare query")?;

        let preferences = stmt
            .query_map([], Self::build_preferences_from_row)
            .db_context("Failed to query preferences")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch preferences")?;

        Ok(preferences)
    }

    /// Retrieves the preferences of a trip.
    pub fn get_preferences_by_trip(&self, trip_id: u64) -> Result<TripPreferences> {
        self.connection
            .query_row(
                &format!("SELECT {PREFERENCE_COLUMNS} FROM trip_preferences WHERE trip_id = ?1"),
                params![trip_id as i64],
                Self::build_preferences_from_row,
            )
            .optional()
            .db_context("Failed to query preferences")?
            .ok_or_else(|| BackendError::not_found(Entity::Preferences, trip_id))
    }

    /// Stores preferences for an existing trip. A trip holds at most one
    /// preferences record; a second insert is a conflict.
    pub fn create_preferences(&mut self, preferences: &NewTripPreferences) -> Result<TripPreferences> {
        let stops = to_json(&preferences.stop_preferences)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_exists: bool = tx
            .query_row(
                CHECK_TRIP_EXISTS_SQL,
                params![preferences.trip_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check trip existence")?;

        if !trip_exists {
            return Err(BackendError::not_found(Entity::Trip, preferences.trip_id));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PREFERENCES_SQL,
            params![
                &now_str,
                &now_str,
                preferences.trip_id as i64,
                stops,
                i64::from(preferences.distance_between_stops),
                preferences.accommodation.as_str(),
                preferences.dining.as_str(),
            ],
        )
        .db_context("Failed to insert preferences")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TripPreferences {
            id,
            created_at: now,
            updated_at: now,
            trip_id: preferences.trip_id,
            stop_preferences: preferences.stop_preferences.clone(),
            distance_between_stops: preferences.distance_between_stops,
            accommodation: preferences.accommodation,
            dining: preferences.dining,
        })
    }

    /// Applies a partial update to a trip's preferences.
    pub fn update_preferences(
        &mut self,
        trip_id: u64,
        update: &UpdateTripPreferences,
    ) -> Result<TripPreferences> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut preferences = tx
            .query_row(
                &format!("SELECT {PREFERENCE_COLUMNS} FROM trip_preferences WHERE trip_id = ?1"),
                params![trip_id as i64],
                Self::build_preferences_from_row,
            )
            .optional()
            .db_context("Failed to query preferences")?
            .ok_or_else(|| BackendError::not_found(Entity::Preferences, trip_id))?;

        update.apply_to(&mut preferences);
        preferences.updated_at = Timestamp::now();

        tx.execute(
            UPDATE_PREFERENCES_SQL,
            params![
                preferences.updated_at.to_string(),
                to_json(&preferences.stop_preferences)?,
                i64::from(preferences.distance_between_stops),
                preferences.accommodation.as_str(),
                preferences.dining.as_str(),
                trip_id as i64,
            ],
        )
        .db_context("Failed to update preferences")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(preferences)
    }

    /// Deletes the preferences of a trip.
    pub fn delete_preferences(&mut self, trip_id: u64) -> Result<()> {
        let rows = self
            .connection
            .execute(DELETE_PREFERENCES_SQL, params![trip_id as i64])
            .db_context("Failed to delete preferences")?;

        if rows == 0 {
            return Err(BackendError::not_found(Entity::Preferences, trip_id));
        }
        Ok(())
    }
}
