//! Trip participant CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{
    trip_queries::CHECK_TRIP_EXISTS_SQL,
    utils::{enum_column, id_column, timestamp_column},
};
use crate::{
    error::{BackendError, DatabaseResultExt, Entity, Result},
    models::{NewTripParticipant, TripParticipant, UpdateTripParticipant, UserId},
};

const PARTICIPANT_COLUMNS: &str = "id, created_at, updated_at, trip_id, user_id, role";
const INSERT_PARTICIPANT_SQL: &str = "INSERT INTO trip_participants (created_at, updated_at, trip_id, user_id, role) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_PARTICIPANT_SQL: &str =
    "UPDATE trip_participants SET updated_at = ?1, trip_id = ?2, user_id = ?3, role = ?4 WHERE id = ?5";
const DELETE_PARTICIPANT_SQL: &str = "DELETE FROM trip_participants WHERE id = ?1";
const DELETE_PARTICIPANT_BY_USER_SQL: &str =
    "DELETE FROM trip_participants WHERE trip_id = ?1 AND user_id = ?2";

impl super::Database {
    fn build_participant_from_row(row: &rusqlite::Row) -> rusqlite::Result<TripParticipant> {
        Ok(TripParticipant {
            id: id_column(row, 0)?,
            created_at: timestamp_column(row, 1)?,
            updated_at: timestamp_column(row, 2)?,
            trip_id: id_column(row, 3)?,
            user_id: UserId::new(row.get::<_, String>(4)?),
            role: enum_column(row, 5)?,
        })
    }

    fn query_participants(&self, sql: &str, trip_id: Option<u64>) -> Result<Vec<TripParticipant>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;

        let rows = match trip_id {
            Some(trip_id) => stmt.query_map(
                params![trip_id as i64],
                Self::build_participant_from_row,
            ),
            None => stmt.query_map([], Self::build_participant_from_row),
        }
        .db_context("Failed to query participants")?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch participants")
    }

    /// Lists every participant of every trip.
    pub fn get_all_participants(&self) -> Result<Vec<TripParticipant>> {
        self.query_participants(
            &format!("SELECT {PARTICIPANT_COLUMNS} FROM trip_participants ORDER BY trip_id, id"),
            None,
        )
    }

    /// Lists the participants of a trip in the order they joined.
    pub fn get_participants_by_trip(&self, trip_id: u64) -> Result<Vec<TripParticipant>> {
        self.query_participants(
            &format!(
                "SELECT {PARTICIPANT_COLUMNS} FROM trip_participants WHERE trip_id = ?1 ORDER BY id"
            ),
            Some(trip_id),
        )
    }

    /// Adds a participant to an existing trip.
    pub fn create_participant(&mut self, participant: &NewTripParticipant) -> Result<TripParticipant> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_exists: bool = tx
            .query_row(
                CHECK_TRIP_EXISTS_SQL,
                params![participant.trip_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check trip existence")?;

        if !trip_exists {
            return Err(BackendError::not_found(Entity::Trip, participant.trip_id));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PARTICIPANT_SQL,
            params![
                &now_str,
                &now_str,
                participant.trip_id as i64,
                participant.user_id.as_str(),
                participant.role.as_str(),
            ],
        )
        .db_context("Failed to insert participant")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TripParticipant {
            id,
            created_at: now,
            updated_at: now,
            trip_id: participant.trip_id,
            user_id: participant.user_id.clone(),
            role: participant.role,
        })
    }

    /// Applies a partial update to a participant.
    pub fn update_participant(
        &mut self,
        id: u64,
        update: &UpdateTripParticipant,
    ) -> Result<TripParticipant> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut participant = tx
            .query_row(
                &format!("SELECT {PARTICIPANT_COLUMNS} FROM trip_participants WHERE id = ?1"),
                params![id as i64],
                Self::build_participant_from_row,
            )
            .optional()
            .db_context("Failed to query participant")?
            .ok_or_else(|| BackendError::not_found(Entity::Participant, id))?;

        update.apply_to(&mut participant);
        participant.updated_at = Timestamp::now();

        tx.execute(
            UPDATE_PARTICIPANT_SQL,
            params![
                participant.updated_at.to_string(),
                participant.trip_id as i64,
                participant.user_id.as_str(),
                participant.role.as_str(),
                id as i64,
            ],
        )
        .db_context("Failed to update participant")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(participant)
    }

    /// Deletes a participant by id.
    pub fn delete_participant(&mut self, id: u64) -> Result<()> {
        let rows = self
            .connection
            .execute(DELETE_PARTICIPANT_SQL, params![id as i64])
            .db_context("Failed to delete participant")?;

        if rows == 0 {
            return Err(BackendError::not_found(Entity::Participant, id));
        }
        Ok(())
    }

    /// Removes a user from a trip.
    pub fn remove_user_from_trip(&mut self, trip_id: u64, user_id: &UserId) -> Result<()> {
        let rows = self
            .connection
            .execute(
                DELETE_PARTICIPANT_BY_USER_SQL,
                params![trip_id as i64, user_id.as_str()],
            )
            .db_context("Failed to remove user from trip")?;

        if rows == 0 {
            return Err(BackendError::not_found(
                Entity::Participant,
                format!("{user_id} on trip {trip_id}"),
            ));
        }
        Ok(())
    }
}
