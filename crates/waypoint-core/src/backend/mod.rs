//! Data access layer over the trip persistence service.
//!
//! The [`Backend`] trait is the injected capability every higher layer
//! talks to. Each entity family (`trips`, `trip_preferences`,
//! `trip_participants`) gets uniform CRUD operations; participants add the
//! [`Backend::add_user_to_trip`] and [`Backend::remove_user_from_trip`]
//! conveniences.
//!
//! Every operation either returns the requested record(s) or fails with a
//! [`BackendError`](crate::error::BackendError) carrying the store's detail.
//! Nothing here retries, caches or reshapes data, and access control is left
//! to the store.
//!
//! Two implementations ship with the crate:
//!
//! - [`SqliteBackend`]: a local SQLite file, built with [`BackendBuilder`]
//! - [`MemoryBackend`]: in-process maps for tests and local development

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{
        NewTrip, NewTripParticipant, NewTripPreferences, ParticipantRole, Trip, TripParticipant,
        TripPreferences, UpdateTrip, UpdateTripParticipant, UpdateTripPreferences, UserId,
    },
};

pub mod builder;
pub mod memory;
pub mod sqlite;

pub use builder::BackendBuilder;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Asynchronous CRUD access to trips, preferences and participants.
#[async_trait]
pub trait Backend: Send + Sync {
    /// All trips ordered by start date ascending; undated trips last.
    async fn get_all_trips(&self) -> Result<Vec<Trip>>;

    async fn get_trip(&self, id: u64) -> Result<Trip>;

    async fn create_trip(&self, trip: NewTrip) -> Result<Trip>;

    async fn update_trip(&self, id: u64, update: UpdateTrip) -> Result<Trip>;

    /// Deletes a trip together with its preferences and participants.
    async fn delete_trip(&self, id: u64) -> Result<()>;

    async fn get_all_preferences(&self) -> Result<Vec<TripPreferences>>;

    async fn get_preferences_by_trip(&self, trip_id: u64) -> Result<TripPreferences>;

    async fn create_preferences(&self, preferences: NewTripPreferences)
        -> Result<TripPreferences>;

    async fn update_preferences(
        &self,
        trip_id: u64,
        update: UpdateTripPreferences,
    ) -> Result<TripPreferences>;

    async fn delete_preferences(&self, trip_id: u64) -> Result<()>;

    async fn get_all_participants(&self) -> Result<Vec<TripParticipant>>;

    async fn get_participants_by_trip(&self, trip_id: u64) -> Result<Vec<TripParticipant>>;

    async fn create_participant(&self, participant: NewTripParticipant)
        -> Result<TripParticipant>;

    async fn update_participant(
        &self,
        id: u64,
        update: UpdateTripParticipant,
    ) -> Result<TripParticipant>;

    async fn delete_participant(&self, id: u64) -> Result<()>;

    /// Deletes the participant matching both trip and user.
    async fn remove_user_from_trip(&self, trip_id: u64, user_id: &UserId) -> Result<()>;

    /// Adds a user to a trip; the role defaults to member.
    async fn add_user_to_trip(
        &self,
        trip_id: u64,
        user_id: &UserId,
        role: Option<ParticipantRole>,
    ) -> Result<TripParticipant> {
        self.create_participant(NewTripParticipant {
            trip_id,
            user_id: user_id.clone(),
            role: role.unwrap_or_default(),
        })
        .await
    }
}
