//! Trip model definition and its insert/update shapes.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{TripStatus, UserId};

/// A persisted trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,

    /// Display name of the trip
    pub name: String,

    /// Where the trip starts
    pub start_location: Option<String>,

    /// Where the trip ends
    pub destination: String,

    /// First day of the trip, if planned
    pub start_date: Option<Date>,

    /// Last day of the trip, if planned
    pub end_date: Option<Date>,

    #[serde(default)]
    pub status: TripStatus,

    /// Cover image shown on the trip card
    pub thumbnail_url: Option<String>,

    /// Owning user
    pub user_id: UserId,
}

/// Values required to insert a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTrip {
    pub name: String,
    pub start_location: Option<String>,
    pub destination: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub status: TripStatus,
    pub thumbnail_url: Option<String>,
    pub user_id: UserId,
}

/// Partial update of a trip; `None` leaves the column untouched.
///
/// Nullable columns use a nested option so they can be cleared:
/// `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTrip {
    pub name: Option<String>,
    pub start_location: Option<Option<String>>,
    pub destination: Option<String>,
    pub start_date: Option<Option<Date>>,
    pub end_date: Option<Option<Date>>,
    pub status: Option<TripStatus>,
    pub thumbnail_url: Option<Option<String>>,
    pub user_id: Option<UserId>,
}

impl UpdateTrip {
    /// True when the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self == &UpdateTrip::default()
    }

    /// Names of the fields this update touches, for change summaries.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.start_location.is_some() {
            fields.push("start location");
        }
        if self.destination.is_some() {
            fields.push("destination");
        }
        if self.start_date.is_some() {
            fields.push("start date");
        }
        if self.end_date.is_some() {
            fields.push("end date");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.thumbnail_url.is_some() {
            fields.push("thumbnail");
        }
        if self.user_id.is_some() {
            fields.push("owner");
        }
        fields
    }

    /// Applies the update to an existing trip in place.
    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(name) = &self.name {
            trip.name.clone_from(name);
        }
        if let Some(start_location) = &self.start_location {
            trip.start_location.clone_from(start_location);
        }
        if let Some(destination) = &self.destination {
            trip.destination.clone_from(destination);
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(status) = self.status {
            trip.status = status;
        }
        if let Some(thumbnail_url) = &self.thumbnail_url {
            trip.thumbnail_url.clone_from(thumbnail_url);
        }
        if let Some(user_id) = &self.user_id {
            trip.user_id.clone_from(user_id);
        }
    }
}
