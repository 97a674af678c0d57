//! [`Backend`] implementation over a local SQLite file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::task;

use super::Backend;
use crate::{
    db::Database,
    error::{BackendError, BackendOperation, Result},
    models::{
        NewTrip, NewTripParticipant, NewTripPreferences, Trip, TripParticipant, TripPreferences,
        UpdateTrip, UpdateTripParticipant, UpdateTripPreferences, UserId,
    },
};

/// SQLite-backed store. Each call opens its own connection on the blocking
/// pool, so the backend can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pub(crate) db_path: PathBuf,
}

impl SqliteBackend {
    /// Creates a backend for an already initialized database file.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_database<T, F>(&self, operation: BackendOperation, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        debug!("{operation}");
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(BackendError::task)?
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn get_all_trips(&self) -> Result<Vec<Trip>> {
        self.with_database(BackendOperation::GetAllTrips, |db| db.get_all_trips())
            .await
    }

    async fn get_trip(&self, id: u64) -> Result<Trip> {
        self.with_database(BackendOperation::GetTrip, move |db| db.get_trip(id))
            .await
    }

    async fn create_trip(&self, trip: NewTrip) -> Result<Trip> {
        self.with_database(BackendOperation::CreateTrip, move |db| db.create_trip(&trip))
            .await
    }

    async fn update_trip(&self, id: u64, update: UpdateTrip) -> Result<Trip> {
        self.with_database(BackendOperation::UpdateTrip, move |db| {
            db.update_trip(id, &update)
        })
        .await
    }

    async fn delete_trip(&self, id: u64) -> Result<()> {
        self.with_database(BackendOperation::DeleteTrip, move |db| db.delete_trip(id))
            .await
    }

    async fn get_all_preferences(&self) -> Result<Vec<TripPreferences>> {
        self.with_database(BackendOperation::GetAllPreferences, |db| {
            db.get_all_preferences()
        })
        .await
    }

    async fn get_preferences_by_trip(&self, trip_id: u64) -> Result<TripPreferences> {
        self.with_database(BackendOperation::GetPreferences, move |db| {
            db.get_preferences_by_trip(trip_id)
        })
        .await
    }

    async fn create_preferences(
        &self,
        preferences: NewTripPreferences,
    ) -> Result<TripPreferences> {
        self.with_database(BackendOperation::CreatePreferences, move |db| {
            db.create_preferences(&preferences)
        })
        .await
    }

    async fn update_preferences(
        &self,
        trip_id: u64,
        update: UpdateTripPreferences,
    ) -> Result<TripPreferences> {
        self.with_database(BackendOperation::UpdatePreferences, move |db| {
            db.update_preferences(trip_id, &update)
        })
        .await
    }

    async fn delete_preferences(&self, trip_id: u64) -> Result<()> {
        self.with_database(BackendOperation::DeletePreferences, move |db| {
            db.delete_preferences(trip_id)
        })
        .await
    }

    async fn get_all_participants(&self) -> Result<Vec<TripParticipant>> {
        self.with_database(BackendOperation::GetAllParticipants, |db| {
            db.get_all_participants()
        })
        .await
    }

    async fn get_participants_by_trip(&self, trip_id: u64) -> Result<Vec<TripParticipant>> {
        self.with_database(BackendOperation::GetParticipants, move |db| {
            db.get_participants_by_trip(trip_id)
        })
        .await
    }

    async fn create_participant(
        &self,
        participant: NewTripParticipant,
    ) -> Result<TripParticipant> {
        self.with_database(BackendOperation::CreateParticipant, move |db| {
            db.create_participant(&participant)
        })
        .await
    }

    async fn update_participant(
        &self,
        id: u64,
        update: UpdateTripParticipant,
    ) -> Result<TripParticipant> {
        self.with_database(BackendOperation::UpdateParticipant, move |db| {
            db.update_participant(id, &update)
        })
        .await
    }

    async fn delete_participant(&self, id: u64) -> Result<()> {
        self.with_database(BackendOperation::DeleteParticipant, move |db| {
            db.delete_participant(id)
        })
        .await
    }

    async fn remove_user_from_trip(&self, trip_id: u64, user_id: &UserId) -> Result<()> {
        let user_id = user_id.clone();
        self.with_database(BackendOperation::RemoveUserFromTrip, move |db| {
            db.remove_user_from_trip(trip_id, &user_id)
        })
        .await
    }
}
