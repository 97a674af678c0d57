//! In-memory [`Backend`] for tests and local development.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use jiff::Timestamp;
use log::debug;
use tokio::sync::RwLock;

use super::Backend;
use crate::{
    error::{BackendError, BackendOperation, Entity, Result},
    models::{
        NewTrip, NewTripParticipant, NewTripPreferences, Trip, TripParticipant, TripPreferences,
        UpdateTrip, UpdateTripParticipant, UpdateTripPreferences, UserId,
    },
};

#[derive(Default)]
struct Tables {
    trips: BTreeMap<u64, Trip>,
    /// Keyed by trip id
    preferences: BTreeMap<u64, TripPreferences>,
    participants: BTreeMap<u64, TripParticipant>,
    last_trip_id: u64,
    last_preferences_id: u64,
    last_participant_id: u64,
    failing: HashSet<BackendOperation>,
}

impl Tables {
    fn check(&self, operation: BackendOperation) -> Result<()> {
        debug!("{operation} (memory)");
        if self.failing.contains(&operation) {
            return Err(BackendError::Unavailable {
                operation,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn require_trip(&self, trip_id: u64) -> Result<()> {
        if self.trips.contains_key(&trip_id) {
            Ok(())
        } else {
            Err(BackendError::not_found(Entity::Trip, trip_id))
        }
    }
}

/// Backend keeping every table in process memory.
///
/// Mirrors the constraints of the SQL schema: one preferences record per
/// trip, one participant per (trip, user), and cascading trip deletes.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    /// Create a new, empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call of `operation` fail with
    /// [`BackendError::Unavailable`] until [`MemoryBackend::clear_failures`].
    pub async fn fail_operation(&self, operation: BackendOperation) {
        self.tables.write().await.failing.insert(operation);
    }

    /// Restores normal behavior for every operation.
    pub async fn clear_failures(&self) {
        self.tables.write().await.failing.clear();
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get_all_trips(&self) -> Result<Vec<Trip>> {
        let tables = self.tables.read().await;
        tables.check(BackendOperation::GetAllTrips)?;

        let mut trips: Vec<Trip> = tables.trips.values().cloned().collect();
        trips.sort_by_key(|t| (t.start_date.is_none(), t.start_date, t.id));
        Ok(trips)
    }

    async fn get_trip(&self, id: u64) -> Result<Trip> {
        let tables = self.tables.read().await;
        tables.check(BackendOperation::GetTrip)?;

        tables
            .trips
            .get(&id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(Entity::Trip, id))
    }

    async fn create_trip(&self, trip: NewTrip) -> Result<Trip> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::CreateTrip)?;

        tables.last_trip_id += 1;
        let now = Timestamp::now();
        let created = Trip {
            id: tables.last_trip_id,
            created_at: now,
            updated_at: now,
            name: trip.name,
            start_location: trip.start_location,
            destination: trip.destination,
            start_date: trip.start_date,
            end_date: trip.end_date,
            status: trip.status,
            thumbnail_url: trip.thumbnail_url,
            user_id: trip.user_id,
        };
        tables.trips.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_trip(&self, id: u64, update: UpdateTrip) -> Result<Trip> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::UpdateTrip)?;

        let trip = tables
            .trips
            .get_mut(&id)
            .ok_or_else(|| BackendError::not_found(Entity::Trip, id))?;
        update.apply_to(trip);
        trip.updated_at = Timestamp::now();
        Ok(trip.clone())
    }

    async fn delete_trip(&self, id: u64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::DeleteTrip)?;

        if tables.trips.remove(&id).is_none() {
            return Err(BackendError::not_found(Entity::Trip, id));
        }
        tables.preferences.remove(&id);
        tables.participants.retain(|_, p| p.trip_id != id);
        Ok(())
    }

    async fn get_all_preferences(&self) -> Result<Vec<TripPreferences>> {
        let tables = self.tables.read().await;
        tables.check(BackendOperation::GetAllPreferences)?;
        Ok(tables.preferences.values().cloned().collect())
    }

    async fn get_preferences_by_trip(&self, trip_id: u64) -> Result<TripPreferences> {
        let tables = self.tables.read().await;
        tables.check(BackendOperation::GetPreferences)?;

        tables
            .preferences
            .get(&trip_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(Entity::Preferences, trip_id))
    }

    async fn create_preferences(
        &self,
        preferences: NewTripPreferences,
    ) -> Result<TripPreferences> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::CreatePreferences)?;
        tables.require_trip(preferences.trip_id)?;

        if tables.preferences.contains_key(&preferences.trip_id) {
            return Err(BackendError::Conflict {
                message: format!("Trip {} already has preferences", preferences.trip_id),
            });
        }

        tables.last_preferences_id += 1;
        let now = Timestamp::now();
        let created = TripPreferences {
            id: tables.last_preferences_id,
            created_at: now,
            updated_at: now,
            trip_id: preferences.trip_id,
            stop_preferences: preferences.stop_preferences,
            distance_between_stops: preferences.distance_between_stops,
            accommodation: preferences.accommodation,
            dining: preferences.dining,
        };
        tables.preferences.insert(created.trip_id, created.clone());
        Ok(created)
    }

    async fn update_preferences(
        &self,
        trip_id: u64,
        update: UpdateTripPreferences,
    ) -> Result<TripPreferences> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::UpdatePreferences)?;

        let preferences = tables
            .preferences
            .get_mut(&trip_id)
            .ok_or_else(|| BackendError::not_found(Entity::Preferences, trip_id))?;
        update.apply_to(preferences);
        preferences.updated_at = Timestamp::now();
        Ok(preferences.clone())
    }

    async fn delete_preferences(&self, trip_id: u64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::DeletePreferences)?;

        tables
            .preferences
            .remove(&trip_id)
            .map(|_| ())
            .ok_or_else(|| BackendError::not_found(Entity::Preferences, trip_id))
    }

    async fn get_all_participants(&self) -> Result<Vec<TripParticipant>> {
        let tables = self.tables.read().await;
        tables.check(BackendOperation::GetAllParticipants)?;

        let mut participants: Vec<TripParticipant> =
            tables.participants.values().cloned().collect();
        participants.sort_by_key(|p| (p.trip_id, p.id));
        Ok(participants)
    }

    async fn get_participants_by_trip(&self, trip_id: u64) -> Result<Vec<TripParticipant>> {
        let tables = self.tables.read().await;
        tables.check(BackendOperation::GetParticipants)?;

        Ok(tables
            .participants
            .values()
            .filter(|p| p.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn create_participant(
        &self,
        participant: NewTripParticipant,
    ) -> Result<TripParticipant> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::CreateParticipant)?;
        tables.require_trip(participant.trip_id)?;

        let duplicate = tables
            .participants
            .values()
            .any(|p| p.trip_id == participant.trip_id && p.user_id == participant.user_id);
        if duplicate {
            return Err(BackendError::Conflict {
                message: format!(
                    "User {} already participates in trip {}",
                    participant.user_id, participant.trip_id
                ),
            });
        }

        tables.last_participant_id += 1;
        let now = Timestamp::now();
        let created = TripParticipant {
            id: tables.last_participant_id,
            created_at: now,
            updated_at: now,
            trip_id: participant.trip_id,
            user_id: participant.user_id,
            role: participant.role,
        };
        tables.participants.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_participant(
        &self,
        id: u64,
        update: UpdateTripParticipant,
    ) -> Result<TripParticipant> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::UpdateParticipant)?;

        let participant = tables
            .participants
            .get_mut(&id)
            .ok_or_else(|| BackendError::not_found(Entity::Participant, id))?;
        update.apply_to(participant);
        participant.updated_at = Timestamp::now();
        Ok(participant.clone())
    }

    async fn delete_participant(&self, id: u64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::DeleteParticipant)?;

        tables
            .participants
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| BackendError::not_found(Entity::Participant, id))
    }

    async fn remove_user_from_trip(&self, trip_id: u64, user_id: &UserId) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check(BackendOperation::RemoveUserFromTrip)?;

        let before = tables.participants.len();
        tables
            .participants
            .retain(|_, p| !(p.trip_id == trip_id && &p.user_id == user_id));

        if tables.participants.len() == before {
            return Err(BackendError::not_found(
                Entity::Participant,
                format!("{user_id} on trip {trip_id}"),
            ));
        }
        Ok(())
    }
}
